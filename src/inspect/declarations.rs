//! Declarations read from XML generator output.
//!
//! Only class-like elements are indexed: the scan looks at opening `<Class`
//! and `<Struct` tags and their `name` attribute and skips everything else.

/// Element tags that describe class-like declarations
const CLASS_TAGS: [&str; 2] = ["<Class ", "<Struct "];

/// Index of declarations extracted from the candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    classes: Vec<String>,
}

impl DeclarationIndex {
    /// Build the index from generator XML
    pub fn from_xml(xml: &str) -> Self {
        let mut found: Vec<(usize, String)> = Vec::new();

        for tag in CLASS_TAGS {
            let mut rest = xml;
            let mut offset = 0;
            while let Some(start) = rest.find(tag) {
                let element = &rest[start..];
                // Generators escape '>' inside attribute values, so the first one closes the tag
                let end = element.find('>').unwrap_or(element.len());
                if let Some(name) = attribute(&element[..end], "name") {
                    // Anonymous records carry an empty name
                    if !name.is_empty() {
                        found.push((offset + start, unescape(name)));
                    }
                }
                offset += start + tag.len();
                rest = &rest[start + tag.len()..];
            }
        }

        // Document order across both tags
        found.sort_by_key(|(position, _)| *position);
        DeclarationIndex {
            classes: found.into_iter().map(|(_, name)| name).collect(),
        }
    }

    /// Class and struct names in document order
    pub fn class_names(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Value of `key="..."` inside an opening tag
fn attribute<'a>(tag: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", key);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
