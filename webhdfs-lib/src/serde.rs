use std::fmt;

use serde::de;

use crate::permission::Permission;

struct PermissionVisitor;

impl<'de> de::Visitor<'de> for PermissionVisitor {
    type Value = Permission;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an octal permission string or integer")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        s.parse().map_err(|_|
            E::invalid_value(de::Unexpected::Str(s), &self)
        )
    }

    // some gateways send the octal digits as a json number, e.g. 755
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.to_string().parse().map_err(|_|
            E::invalid_value(de::Unexpected::Unsigned(v), &self)
        )
    }
}

pub mod permission_str {
    use serde::{ser, de};

    use crate::permission::Permission;
    use super::PermissionVisitor;

    pub fn serialize<S>(perm: &Permission, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        serializer.collect_str(perm)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Permission, D::Error>
    where
        D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(PermissionVisitor)
    }
}

/// timestamps sent as milliseconds since the unix epoch
pub mod millis {
    use chrono::{DateTime, Utc, TimeZone};
    use serde::{ser, de, Deserialize};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        serializer.serialize_i64(dt.timestamp_millis())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: de::Deserializer<'de>
    {
        let ms = i64::deserialize(deserializer)?;

        Utc.timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", ms)))
    }
}

/// byte arrays sent as lowercase hex strings
pub mod hex_bytes {
    use std::fmt::Write;

    use serde::{ser, de, Deserialize};

    pub fn encode(bytes: &[u8]) -> String {
        let mut rtn = String::with_capacity(bytes.len() * 2);

        for byte in bytes {
            // writing to a String does not fail
            let _ = write!(rtn, "{:02x}", byte);
        }

        rtn
    }

    pub fn decode(given: &str) -> Option<Vec<u8>> {
        if given.len() % 2 != 0 || !given.is_ascii() {
            return None;
        }

        let mut rtn = Vec::with_capacity(given.len() / 2);

        for index in (0..given.len()).step_by(2) {
            rtn.push(u8::from_str_radix(&given[index..index + 2], 16).ok()?);
        }

        Some(rtn)
    }

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        serializer.serialize_str(&encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: de::Deserializer<'de>
    {
        let given = String::deserialize(deserializer)?;

        decode(&given).ok_or_else(|| de::Error::invalid_value(
            de::Unexpected::Str(&given),
            &"a hex encoded string"
        ))
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Utc, Datelike};
    use serde::{Serialize, Deserialize};

    use crate::permission::Permission;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::permission_str")]
        permission: Permission,
        #[serde(with = "super::millis")]
        modified: DateTime<Utc>,
        #[serde(with = "super::hex_bytes")]
        bytes: Vec<u8>,
    }

    #[test]
    fn deserialize_wire_values() {
        let json = r#"{"permission":"755","modified":1320171722771,"bytes":"00ff10"}"#;
        let sample: Sample = serde_json::from_str(json).expect("failed to parse sample");

        assert_eq!(sample.permission.mode(), 0o755);
        assert_eq!(sample.modified.timestamp_millis(), 1320171722771);
        assert_eq!(sample.modified.year(), 2011);
        assert_eq!(sample.bytes, vec![0x00, 0xff, 0x10]);

        let output = serde_json::to_string(&sample).expect("failed to serialize sample");

        assert_eq!(output, json);
    }

    #[test]
    fn permission_as_number() {
        let json = r#"{"permission":644,"modified":0,"bytes":""}"#;
        let sample: Sample = serde_json::from_str(json).expect("failed to parse sample");

        assert_eq!(sample.permission.mode(), 0o644);
        assert!(sample.bytes.is_empty());
    }

    #[test]
    fn invalid_hex() {
        let invalid = [
            r#"{"permission":"755","modified":0,"bytes":"abc"}"#,
            r#"{"permission":"755","modified":0,"bytes":"zz"}"#,
        ];

        for json in invalid {
            assert!(serde_json::from_str::<Sample>(json).is_err(), "invalid hex passed {:?}", json);
        }
    }
}
