use std::str::FromStr;

use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// Reported as `operatingSystem`. Falls back to the target OS when unset.
    #[envconfig(from = "OPERATING_SYSTEM")]
    pub operating_system: Option<NonEmptyString>,

    /// Log events instead of writing them as JSON lines.
    #[envconfig(default = "false")]
    pub print_sink: bool,
}

impl Config {
    pub fn operating_system(&self) -> String {
        match &self.operating_system {
            Some(name) => name.as_str().to_owned(),
            None => default_operating_system(),
        }
    }
}

pub fn default_operating_system() -> String {
    std::env::consts::OS.to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct StringIsEmptyError;

impl FromStr for NonEmptyString {
    type Err = StringIsEmptyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err(StringIsEmptyError)
        } else {
            Ok(NonEmptyString(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_to_target_os() {
        let config = Config::init_from_hashmap(&HashMap::new()).unwrap();

        assert!(!config.print_sink);
        assert!(config.operating_system.is_none());
        assert_eq!(config.operating_system(), std::env::consts::OS);
    }

    #[test]
    fn reads_operating_system_override() {
        let env = HashMap::from([
            ("OPERATING_SYSTEM".to_owned(), "Android - 14".to_owned()),
            ("PRINT_SINK".to_owned(), "true".to_owned()),
        ]);
        let config = Config::init_from_hashmap(&env).unwrap();

        assert!(config.print_sink);
        assert_eq!(config.operating_system(), "Android - 14");
    }

    #[test]
    fn empty_strings_do_not_parse() {
        assert_eq!("".parse::<NonEmptyString>(), Err(StringIsEmptyError));
        assert_eq!(
            "iOS".parse::<NonEmptyString>(),
            Ok(NonEmptyString("iOS".to_owned()))
        );
    }
}
