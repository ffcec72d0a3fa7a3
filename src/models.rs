use serde::{Deserialize, Deserializer, Serialize};

/// A country record as served by the countries endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// Missing or null regions decode as an empty string
    #[serde(default, deserialize_with = "string_or_null")]
    pub region: String,
    /// Flag image URL; empty strings are treated as absent
    #[serde(default, deserialize_with = "non_empty_string")]
    pub flag: Option<String>,
}

impl Country {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Country {
            name: name.into(),
            region: region.into(),
            flag: None,
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        self.flag = if flag.trim().is_empty() { None } else { Some(flag) };
        self
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A featured slide shown above the country list
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl Slide {
    /// Slide featuring a single country
    pub fn for_country(index: usize, country: &Country) -> Self {
        Slide {
            id: index.to_string(),
            title: country.name.clone(),
            description: format!("Explore {} in {}", country.name, country.region),
            image: country.flag.clone(),
        }
    }
}

/// Signed-in user. There is no credential check behind it.
#[derive(Clone, Debug)]
pub struct Session {
    pub email: String,
    pub keep_signed_in: bool,
    pub signed_in_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, keep_signed_in: bool) -> Self {
        Session {
            email: email.into(),
            keep_signed_in,
            signed_in_at: chrono::Utc::now(),
        }
    }
}
