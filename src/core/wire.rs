use serde::{Deserialize, Deserializer};

/// Outer shape of every DUPR JSON response: `{"status": "...", "message": "...", "result": {...}}`.
#[derive(Deserialize)]
pub struct Envelope<T> {
    pub(crate) message: Option<String>,
    pub(crate) result: Option<T>,
}

/// One page of a paginated listing, as found under `result`.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageNode<T> {
    #[serde(default, deserialize_with = "de_opt_u64_from_any")]
    pub(crate) offset: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64_from_any")]
    pub(crate) limit: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64_from_any")]
    pub(crate) total: Option<u64>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub(crate) hits: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyScalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl AnyScalar {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Str(s) => s.trim().parse().ok(),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(_) => None,
        }
    }
}

/// Ids arrive as numbers from some endpoints and strings from others.
pub fn de_string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    AnyScalar::deserialize(deserializer).map(AnyScalar::into_string)
}

pub fn de_opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AnyScalar>::deserialize(deserializer)?.map(AnyScalar::into_string))
}

/// Numbers or numeric strings; anything unparseable becomes `None` rather than an error.
pub fn de_opt_f64_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AnyScalar>::deserialize(deserializer)?.and_then(|v| v.as_f64()))
}

/// `null` reads as the type's default, e.g. an empty list.
pub fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole numbers sent as ints, floats (`11.0`) or strings. Anything else is `None`.
#[allow(clippy::cast_possible_truncation)]
pub fn de_opt_i64_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AnyScalar>::deserialize(deserializer)? {
        Some(AnyScalar::Int(i)) => Some(i),
        Some(other) => other
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= 9.0e15)
            .map(|f| f as i64),
        None => None,
    })
}

/// Booleans, `"true"`/`"false"` strings or `0`/`1`. Anything else is `None`.
pub fn de_opt_bool_from_any<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AnyScalar>::deserialize(deserializer)? {
        Some(AnyScalar::Bool(b)) => Some(b),
        Some(AnyScalar::Int(0)) => Some(false),
        Some(AnyScalar::Int(1)) => Some(true),
        Some(AnyScalar::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn de_opt_u32_from_any<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = de_opt_f64_from_any(deserializer)?;
    Ok(v.filter(|f| *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f.round() as u32))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn de_opt_u64_from_any<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AnyScalar>::deserialize(deserializer)? {
        Some(AnyScalar::Int(i)) => u64::try_from(i)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("negative paging value {i}"))),
        Some(AnyScalar::Float(f)) if f.fract() == 0.0 && f >= 0.0 => Ok(Some(f as u64)),
        Some(AnyScalar::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid paging value {s:?}"))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid paging value {}",
            other.into_string()
        ))),
        None => Ok(None),
    }
}
