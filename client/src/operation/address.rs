use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Path of a resource in the management model, e.g. `/subsystem=datasources/xa-data-source=ExampleDS`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    segments: Vec<(String, String)>,
}

impl Address {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn subsystem(name: impl Into<String>) -> Self {
        Self::root().and("subsystem", name)
    }

    pub fn and(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.segments.push((kind.into(), name.into()));
        self
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[(String, String)] {
        &self.segments
    }

    /// Last `(type, name)` pair, `None` for the root
    pub fn last(&self) -> Option<(&str, &str)> {
        self.segments
            .last()
            .map(|(kind, name)| (kind.as_str(), name.as_str()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for (kind, name) in &self.segments {
            write!(f, "/{}={}", kind, name)?;
        }
        Ok(())
    }
}

// The wire form is an array of single-entry objects, which keeps segment order
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Segment<'a>(&'a str, &'a str);

        impl Serialize for Segment<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.0, self.1)?;
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.segments.len()))?;
        for (kind, name) in &self.segments {
            seq.serialize_element(&Segment(kind, name))?;
        }
        seq.end()
    }
}
