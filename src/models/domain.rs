use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::Arc;

/// Accessors the duplicate detector needs from a record
///
/// Every field is optional: a record missing a field is simply not indexed
/// or matched on that dimension.
pub trait Contact {
    fn email(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
    fn first_name(&self) -> Option<&str>;
    fn last_name(&self) -> Option<&str>;
}

/// A record carrying a numeric score for the rating tree
pub trait Rated {
    fn score(&self) -> Option<f64>;
}

/// A record carrying a numeric priority for the priority queue
pub trait Prioritized {
    fn priority(&self) -> Option<f64>;
}

// Shared handles forward to the record they point at, so callers can index
// the same record from several structures without copying it.
macro_rules! forward_record_traits {
    ($($wrapper:ty),*) => {
        $(
            impl<T: Contact + ?Sized> Contact for $wrapper {
                fn email(&self) -> Option<&str> { (**self).email() }
                fn phone(&self) -> Option<&str> { (**self).phone() }
                fn first_name(&self) -> Option<&str> { (**self).first_name() }
                fn last_name(&self) -> Option<&str> { (**self).last_name() }
            }

            impl<T: Rated + ?Sized> Rated for $wrapper {
                fn score(&self) -> Option<f64> { (**self).score() }
            }

            impl<T: Prioritized + ?Sized> Prioritized for $wrapper {
                fn priority(&self) -> Option<f64> { (**self).priority() }
            }
        )*
    };
}

forward_record_traits!(&T, Rc<T>, Arc<T>, Box<T>);

/// Customer or provider entry as supplied by the calling layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default = "generate_id")]
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Record {
    /// Create an empty record with a freshly generated id
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            score: None,
            priority: None,
            created_at: Some(chrono::Utc::now()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// First and last name joined by a space, if either is present
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (None, None) => None,
            (first, last) => Some(
                format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
                    .trim()
                    .to_string(),
            ),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Contact for Record {
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

impl Rated for Record {
    fn score(&self) -> Option<f64> {
        self.score
    }
}

impl Prioritized for Record {
    fn priority(&self) -> Option<f64> {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_record() {
        let json = r#"{"firstName": "Ada", "email": "ada@example.com", "score": 4.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.first_name.as_deref(), Some("Ada"));
        assert_eq!(record.last_name, None);
        assert_eq!(record.phone, None);
        assert_eq!(record.score, Some(4.5));
        assert!(!record.id.is_empty(), "Missing id should be generated");
    }

    #[test]
    fn test_full_name() {
        let record = Record::new().with_name("Ada", "Lovelace");
        assert_eq!(record.full_name().as_deref(), Some("Ada Lovelace"));

        let mut first_only = Record::new();
        first_only.first_name = Some("Ada".to_string());
        assert_eq!(first_only.full_name().as_deref(), Some("Ada"));

        assert_eq!(Record::new().full_name(), None);
    }

    #[test]
    fn test_shared_handles_forward_accessors() {
        let record = Arc::new(Record::new().with_email("a@b.com").with_score(3.0));
        assert_eq!(Contact::email(&record), Some("a@b.com"));
        assert_eq!(Rated::score(&record), Some(3.0));

        let rc = Rc::new(Record::new().with_priority(7.0));
        assert_eq!(Prioritized::priority(&rc), Some(7.0));
    }
}
