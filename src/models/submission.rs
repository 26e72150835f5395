use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{IgnoredAny, MapAccess, Visitor},
};

/// Form data posted by the simulation page.
///
/// Decoding is loose: keys are matched exactly first and then
/// case-insensitively, unknown keys are skipped, a repeated key overwrites the
/// earlier value, and a missing key or JSON `null` leaves the zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub plan_type: String,
    pub category: String,
    pub value: f64,
}

impl SubmissionRecord {
    /// Decodes the first JSON value in `body`. Anything after it is ignored,
    /// and invalid UTF-8 is replaced with U+FFFD before parsing.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let body = String::from_utf8_lossy(body);
        let mut stream =
            serde_json::Deserializer::from_str(&body).into_iter::<Option<SubmissionRecord>>();

        match stream.next() {
            Some(record) => Ok(record?.unwrap_or_default()),
            None => Err(serde::de::Error::custom("empty request body")),
        }
    }
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Phone,
    Email,
    PlanType,
    Category,
    Value,
}

impl Field {
    const ALL: [(&'static str, Field); 6] = [
        ("name", Field::Name),
        ("phone", Field::Phone),
        ("email", Field::Email),
        ("planType", Field::PlanType),
        ("category", Field::Category),
        ("value", Field::Value),
    ];

    fn from_key(key: &str) -> Option<Self> {
        if let Some((_, field)) = Self::ALL.iter().find(|(name, _)| *name == key) {
            return Some(*field);
        }

        let folded = key.to_lowercase();
        Self::ALL
            .iter()
            .find(|(name, _)| name.to_lowercase() == folded)
            .map(|(_, field)| *field)
    }
}

struct SubmissionVisitor;

impl<'de> Visitor<'de> for SubmissionVisitor {
    type Value = SubmissionRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with the simulation form fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = SubmissionRecord::default();

        while let Some(key) = map.next_key::<String>()? {
            let Some(field) = Field::from_key(&key) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            match field {
                Field::Name => overwrite(&mut map, &mut record.name)?,
                Field::Phone => overwrite(&mut map, &mut record.phone)?,
                Field::Email => overwrite(&mut map, &mut record.email)?,
                Field::PlanType => overwrite(&mut map, &mut record.plan_type)?,
                Field::Category => overwrite(&mut map, &mut record.category)?,
                Field::Value => overwrite(&mut map, &mut record.value)?,
            }
        }

        Ok(record)
    }
}

// A null value keeps whatever an earlier key already set.
fn overwrite<'de, A, T>(map: &mut A, slot: &mut T) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }

    Ok(())
}

impl<'de> Deserialize<'de> for SubmissionRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SubmissionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_zero_values() {
        let record = SubmissionRecord::from_body(br#"{"name":"Ana"}"#).unwrap();

        assert_eq!(record.name, "Ana");
        assert_eq!(record.plan_type, "");
        assert_eq!(record.value, 0.0);
    }

    #[test]
    fn null_fields_and_null_document_are_accepted() {
        let record = SubmissionRecord::from_body(br#"{"phone":null,"value":null}"#).unwrap();
        assert_eq!(record, SubmissionRecord::default());

        let record = SubmissionRecord::from_body(b"null").unwrap();
        assert_eq!(record, SubmissionRecord::default());

        let record = SubmissionRecord::from_body(br#"{"name":"Ana","name":null}"#).unwrap();
        assert_eq!(record.name, "Ana");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = SubmissionRecord::from_body(
            br#"{"name":"Ana","utm_source":"x","extra":{"nested":[1,2,3]}}"#,
        )
        .unwrap();

        assert_eq!(record.name, "Ana");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let record = SubmissionRecord::from_body(br#"{"name":"a","name":"b"}"#).unwrap();
        assert_eq!(record.name, "b");

        let record = SubmissionRecord::from_body(br#"{"value":1,"VALUE":2.5}"#).unwrap();
        assert_eq!(record.value, 2.5);
    }

    #[test]
    fn keys_match_case_insensitively() {
        let record =
            SubmissionRecord::from_body(br#"{"Name":"Ana","PlanType":"Saude","VALUE":5}"#)
                .unwrap();

        assert_eq!(record.name, "Ana");
        assert_eq!(record.plan_type, "Saude");
        assert_eq!(record.value, 5.0);

        let record = SubmissionRecord::from_body(br#"{"plantype":"PME","EMAIL":"a@b.com"}"#)
            .unwrap();
        assert_eq!(record.plan_type, "PME");
        assert_eq!(record.email, "a@b.com");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let record = SubmissionRecord::from_body(b"{\"name\":\"A\xffna\"}").unwrap();
        assert_eq!(record.name, "A\u{FFFD}na");
    }

    #[test]
    fn trailing_bytes_after_first_value_are_ignored() {
        let record = SubmissionRecord::from_body(br#"{"category":"PME"} trailing"#).unwrap();
        assert_eq!(record.category, "PME");
    }

    #[test]
    fn rejects_broken_syntax_and_wrong_types() {
        assert!(SubmissionRecord::from_body(b"").is_err());
        assert!(SubmissionRecord::from_body(b"{ invalid json }").is_err());
        assert!(SubmissionRecord::from_body(br#"{"value":"199.90"}"#).is_err());
        assert!(SubmissionRecord::from_body(br#"{"name":42}"#).is_err());
        assert!(SubmissionRecord::from_body(b"[1,2]").is_err());
        assert!(SubmissionRecord::from_body(b"\"Ana\"").is_err());
    }
}
