/// hdfs rejects path components containing these
pub const RESERVED_CHARS: [char; 1] = [':'];

pub fn check_control<G>(given: G) -> bool
where
    G: AsRef<str>
{
    !given.as_ref().chars().any(|ch| ch.is_control())
}

/// checks a single path component the way the namenode does before
/// accepting it
pub fn component_valid<G>(given: G) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    if given_ref.is_empty() || given_ref == "." || given_ref == ".." {
        return false;
    }

    if given_ref.contains(&RESERVED_CHARS[..]) {
        return false;
    }

    check_control(given_ref)
}

/// checks that the given path is absolute and every component is valid.
/// repeated separators are allowed since they collapse when the request url
/// is built
pub fn path_valid<G>(given: G) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    let Some(stripped) = given_ref.strip_prefix('/') else {
        return false;
    };

    stripped.split('/')
        .filter(|v| !v.is_empty())
        .all(component_valid)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn component_validation() {
        let valid = [
            "file_name.txt",
            "a",
            "with space",
            "😌utf-8",
        ];

        for test in valid {
            assert!(component_valid(test), "valid string failed {:?}", test);
        }

        let invalid = [
            "",
            ".",
            "..",
            "a:b",
            "tab\there",
        ];

        for test in invalid {
            assert!(!component_valid(test), "invalid string failed {:?}", test);
        }
    }

    #[test]
    fn path_validation() {
        let valid = [
            "/",
            "/user/hadoop",
            "/user//hadoop/",
        ];

        for test in valid {
            assert!(path_valid(test), "valid string failed {:?}", test);
        }

        let invalid = [
            "",
            "relative/path",
            "/user/../etc",
            "/user/a:b",
        ];

        for test in invalid {
            assert!(!path_valid(test), "invalid string failed {:?}", test);
        }
    }
}
