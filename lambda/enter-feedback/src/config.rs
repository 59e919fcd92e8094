use lambda_http::Error;

const TABLE_NAME_VARS: [&str; 2] = ["table_name", "TABLE_NAME"];

pub(crate) struct Config {
    pub(crate) table_name: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = TABLE_NAME_VARS
            .iter()
            .find_map(|key| lookup(key))
            .ok_or_else(|| Error::from("table_name not set"))?;

        if table_name.trim().is_empty() {
            return Err(Error::from("table_name cannot be empty"));
        }

        Ok(Self { table_name })
    }
}
