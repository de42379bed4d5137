pub mod errors;

pub use errors::{FormatErrorKind, IniError, IniErrorCategory, IniResult, UnwritableKind};

use crate::parser::line::{is_writable_key, is_writable_section_name};
use serde::Serialize;
use std::str::FromStr;

/// Parsed INI file: sections in source order, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn add_section(&mut self, section: IniSection) -> &mut IniSection {
        self.sections.push(section);
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn last_section_mut(&mut self) -> Option<&mut IniSection> {
        self.sections.last_mut()
    }

    pub fn add_sections(&mut self, sections: impl IntoIterator<Item = IniSection>) {
        self.sections.extend(sections);
    }

    /// First section whose name matches, ignoring ASCII case.
    pub fn find_section(&self, name: &str) -> Option<&IniSection> {
        self.sections
            .iter()
            .find(|section| section.is_name_equal_to(name))
    }

    pub fn find_section_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections
            .iter_mut()
            .find(|section| section.is_name_equal_to(name))
    }

    pub fn find_sections<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IniSection> {
        self.sections
            .iter()
            .filter(move |section| section.is_name_equal_to(name))
    }

    pub fn require_section(&self, name: &str) -> IniResult<&IniSection> {
        self.find_section(name)
            .ok_or_else(|| IniError::MissingSection {
                section: name.to_string(),
            })
    }

    /// Renames every section called `old_name`; returns how many were renamed.
    /// `new_name` must be a name the writer can emit.
    pub fn rename_sections(&mut self, old_name: &str, new_name: &str) -> IniResult<usize> {
        if !is_writable_section_name(new_name) {
            return Err(IniError::Unwritable {
                section: new_name.to_string(),
                kind: UnwritableKind::SectionName,
            });
        }

        let mut renamed = 0;
        for section in self
            .sections
            .iter_mut()
            .filter(|section| section.is_name_equal_to(old_name))
        {
            section.name = new_name.to_string();
            renamed += 1;
        }
        Ok(renamed)
    }

    pub fn remove_sections(&mut self, name: &str) -> usize {
        let before = self.sections.len();
        self.sections.retain(|section| !section.is_name_equal_to(name));
        before - self.sections.len()
    }
}

impl FromIterator<IniSection> for IniDocument {
    fn from_iter<T: IntoIterator<Item = IniSection>>(iter: T) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IniDocument {
    type Item = IniSection;
    type IntoIter = std::vec::IntoIter<IniSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniSection {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
    properties: Vec<IniProperty>,
}

impl IniSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_number: None,
            properties: Vec::new(),
        }
    }

    pub(crate) fn parsed(name: impl Into<String>, line_number: usize) -> Self {
        Self {
            line_number: Some(line_number),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn properties(&self) -> &[IniProperty] {
        &self.properties
    }

    pub fn is_name_equal_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn push_property(&mut self, property: IniProperty) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.push_property(IniProperty::new(key, value))
    }

    pub fn add_property_with_comment(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        comment: impl Into<String>,
    ) -> &mut Self {
        self.push_property(IniProperty::new(key, value).with_comment(comment))
    }

    pub fn find_property(&self, key: &str) -> Option<&IniProperty> {
        self.properties
            .iter()
            .find(|property| property.is_key_equal_to(key))
    }

    pub fn find_property_mut(&mut self, key: &str) -> Option<&mut IniProperty> {
        self.properties
            .iter_mut()
            .find(|property| property.is_key_equal_to(key))
    }

    pub fn contains_property(&self, key: &str) -> bool {
        self.find_property(key).is_some()
    }

    pub fn property_value(&self, key: &str) -> Option<&str> {
        self.find_property(key).map(IniProperty::value)
    }

    /// Values of every property with this key, in source order.
    pub fn property_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.properties
            .iter()
            .filter(move |property| property.is_key_equal_to(key))
            .map(IniProperty::value)
    }

    pub fn require_property(&self, key: &str) -> IniResult<&IniProperty> {
        self.find_property(key)
            .ok_or_else(|| IniError::MissingProperty {
                section: self.name.clone(),
                key: key.to_string(),
            })
    }

    /// Updates the first property with this key, or appends a new one.
    pub fn set_property_value(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.find_property_mut(key) {
            Some(property) => property.value = value,
            None => {
                self.properties.push(IniProperty::new(key, value));
            }
        }
        self
    }

    pub fn rename_properties(&mut self, old_key: &str, new_key: &str) -> IniResult<usize> {
        if !is_writable_key(new_key) {
            return Err(IniError::Unwritable {
                section: self.name.clone(),
                kind: UnwritableKind::PropertyKey {
                    key: new_key.to_string(),
                },
            });
        }

        let mut renamed = 0;
        for property in self
            .properties
            .iter_mut()
            .filter(|property| property.is_key_equal_to(old_key))
        {
            property.key = new_key.to_string();
            renamed += 1;
        }
        Ok(renamed)
    }

    pub fn remove_properties(&mut self, key: &str) -> usize {
        let before = self.properties.len();
        self.properties
            .retain(|property| !property.is_key_equal_to(key));
        before - self.properties.len()
    }

    pub fn read_property<T>(&self, key: &str) -> IniResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.require_property(key)?.parse_value(&self.name)
    }

    /// Like [`IniSection::read_property`], but a missing key yields `default`.
    /// A present key with an unparseable value is still an error.
    pub fn read_property_or<T>(&self, key: &str, default: T) -> IniResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.find_property(key) {
            Some(property) => property.parse_value(&self.name),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniProperty {
    key: String,
    value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
}

impl IniProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: String::new(),
            line_number: None,
        }
    }

    pub(crate) fn parsed(key: &str, value: &str, comment: &str, line_number: usize) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.to_string(),
            line_number: Some(line_number),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn is_key_equal_to(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    pub fn parse_value<T>(&self, section: &str) -> IniResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.value
            .parse::<T>()
            .map_err(|error| IniError::InvalidValue {
                section: section.to_string(),
                key: self.key.clone(),
                value: self.value.clone(),
                line: self.line_number,
                message: error.to_string(),
            })
    }
}
