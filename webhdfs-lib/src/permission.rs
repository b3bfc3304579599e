use std::fmt;
use std::str::FromStr;

/// largest mode hdfs accepts, sticky bit included
pub const MAX_MODE: u16 = 0o1777;

/// mode applied to new directories when the requested one is unusable
pub const DEFAULT_DIR_MODE: u16 = 0o700;

/// unix style octal permission of an hdfs entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission(u16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidPermission {
    Empty,
    NotOctal,
    OutOfRange(u32),
}

impl fmt::Display for InvalidPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPermission::Empty => write!(f, "permission string is empty"),
            InvalidPermission::NotOctal => write!(f, "permission is not a valid octal number"),
            InvalidPermission::OutOfRange(v) => write!(f, "permission {:o} is larger than {:o}", v, MAX_MODE),
        }
    }
}

impl std::error::Error for InvalidPermission {}

impl Permission {
    pub fn new(mode: u16) -> Result<Self, InvalidPermission> {
        if mode > MAX_MODE {
            Err(InvalidPermission::OutOfRange(mode as u32))
        } else {
            Ok(Permission(mode))
        }
    }

    /// takes the given mode if it is a usable directory mode, falling back
    /// to 0700 for zero or out of range values
    pub fn dir_or_default(mode: u32) -> Self {
        if mode == 0 || mode > MAX_MODE as u32 {
            Permission(DEFAULT_DIR_MODE)
        } else {
            Permission(mode as u16)
        }
    }

    pub fn mode(&self) -> u16 {
        self.0
    }

    pub fn sticky(&self) -> bool {
        self.0 & 0o1000 != 0
    }

    /// renders the permission as `rwxr-xr-x`, with `t`/`T` in the last
    /// position when the sticky bit is set
    pub fn symbolic(&self) -> String {
        let mut rtn = String::with_capacity(9);

        for shift in [6u16, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;

            rtn.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            rtn.push(if bits & 0o2 != 0 { 'w' } else { '-' });

            if shift == 0 && self.sticky() {
                rtn.push(if bits & 0o1 != 0 { 't' } else { 'T' });
            } else {
                rtn.push(if bits & 0o1 != 0 { 'x' } else { '-' });
            }
        }

        rtn
    }
}

impl Default for Permission {
    fn default() -> Self {
        Permission(DEFAULT_DIR_MODE)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

impl FromStr for Permission {
    type Err = InvalidPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidPermission::Empty);
        }

        let parsed = u32::from_str_radix(s, 8)
            .map_err(|_| InvalidPermission::NotOctal)?;

        if parsed > MAX_MODE as u32 {
            return Err(InvalidPermission::OutOfRange(parsed));
        }

        Ok(Permission(parsed as u16))
    }
}

impl TryFrom<u16> for Permission {
    type Error = InvalidPermission;

    fn try_from(mode: u16) -> Result<Self, Self::Error> {
        Permission::new(mode)
    }
}

impl From<Permission> for u16 {
    fn from(p: Permission) -> u16 {
        p.0
    }
}
