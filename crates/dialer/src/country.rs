//! Country reference entities and the grouped catalog they come in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::{DialerError, DialerResult};

/// Immutable reference entry. `digit_count` fixes the length of the digit
/// sequence while this country is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub flag: String,
    pub calling_code: String,
    pub digit_count: usize,
}

impl Country {
    pub fn new(
        name: impl Into<String>,
        flag: impl Into<String>,
        calling_code: impl Into<String>,
        digit_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            flag: flag.into(),
            calling_code: calling_code.into(),
            digit_count,
        }
    }

    /// Text the selector filter is matched against.
    pub fn search_key(&self) -> String {
        format!("{} {}", self.name, self.calling_code)
    }

    /// Every whitespace-separated term of `query` occurs in the search key,
    /// ignoring case. A blank query matches.
    pub fn matches(&self, query: &str) -> bool {
        let key = self.search_key().to_lowercase();
        query
            .split_whitespace()
            .all(|term| key.contains(&term.to_lowercase()))
    }

    /// `Flag Name +code` as shown on the selector trigger.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.flag, self.name, self.calling_code)
    }

    fn validate(&self) -> DialerResult<()> {
        if self.digit_count == 0 {
            return Err(DialerError::ZeroDigits(self.name.clone()));
        }
        let code_ok = self
            .calling_code
            .strip_prefix('+')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()));
        if !code_ok {
            return Err(DialerError::InvalidCallingCode {
                name: self.name.clone(),
                code: self.calling_code.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CountryGroup {
    #[strum(to_string = "Popular Countries")]
    Popular,
    #[strum(to_string = "Other Lesser Known Countries")]
    Other,
}

/// Ordered countries in two groups; the first popular entry is the default
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCatalog {
    popular: Vec<Country>,
    other: Vec<Country>,
}

impl CountryCatalog {
    pub fn new(popular: Vec<Country>, other: Vec<Country>) -> DialerResult<Self> {
        let catalog = Self { popular, other };
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn validate(&self) -> DialerResult<()> {
        if self.popular.is_empty() {
            return Err(DialerError::NoDefaultCountry);
        }
        let mut seen = HashSet::new();
        for (_, country) in self.iter() {
            country.validate()?;
            if !seen.insert(country.name.to_lowercase()) {
                return Err(DialerError::DuplicateCountry(country.name.clone()));
            }
        }
        Ok(())
    }

    pub fn default_country(&self) -> &Country {
        // validate() guarantees a popular entry
        &self.popular[0]
    }

    pub fn group(&self, group: CountryGroup) -> &[Country] {
        match group {
            CountryGroup::Popular => &self.popular,
            CountryGroup::Other => &self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.popular.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in display order, tagged with their group.
    pub fn iter(&self) -> impl Iterator<Item = (CountryGroup, &Country)> + '_ {
        CountryGroup::iter()
            .flat_map(move |group| self.group(group).iter().map(move |c| (group, c)))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Country> {
        self.iter()
            .map(|(_, c)| c)
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`find_by_name`](Self::find_by_name) but fails with
    /// [`DialerError::UnknownCountry`].
    pub fn resolve(&self, name: &str) -> DialerResult<&Country> {
        self.find_by_name(name)
            .ok_or_else(|| DialerError::UnknownCountry(name.to_string()))
    }

    /// Entries whose search key matches `query`, in catalog order.
    pub fn filter(&self, query: &str) -> Vec<(CountryGroup, &Country)> {
        self.iter().filter(|(_, c)| c.matches(query)).collect()
    }
}
