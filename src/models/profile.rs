/// Local user profile, stored as a single `displayName,email,gender` line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub display_name: String,
    pub email: String,
    pub gender: String,
}

impl Profile {
    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.display_name, self.email, self.gender)
    }

    /// Parse a profile line; needs at least the three expected fields.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ',');
        Some(Self {
            display_name: parts.next()?.to_string(),
            email: parts.next()?.to_string(),
            gender: parts.next()?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_line_round_trips() {
        let p = Profile {
            display_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            gender: "F".to_string(),
        };
        assert_eq!(Profile::from_line(&p.to_line()), Some(p));
    }

    #[test]
    fn short_line_is_rejected() {
        assert_eq!(Profile::from_line("only,two"), None);
    }
}
