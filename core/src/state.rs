//! The fixed set of 50 states plus the District of Columbia.
//!
//! Code and full name come from one table, so every variant carries exactly
//! one of each and the name/code translation cannot drift apart.

use std::fmt;
use std::str::FromStr;

use crate::UnknownStateError;

macro_rules! states {
    ($($variant:ident => $code:literal, $name:literal;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum State {
            $($variant,)+
        }

        impl State {
            pub const ALL: &'static [State] = &[$(State::$variant,)+];

            /// Two-letter postal code, as used by the map layer.
            pub const fn code(self) -> &'static str {
                match self {
                    $(State::$variant => $code,)+
                }
            }

            /// Full name, as used in the data sources.
            pub const fn name(self) -> &'static str {
                match self {
                    $(State::$variant => $name,)+
                }
            }
        }
    };
}

states! {
    Alabama => "AL", "Alabama";
    Alaska => "AK", "Alaska";
    Arizona => "AZ", "Arizona";
    Arkansas => "AR", "Arkansas";
    California => "CA", "California";
    Colorado => "CO", "Colorado";
    Connecticut => "CT", "Connecticut";
    Delaware => "DE", "Delaware";
    DistrictOfColumbia => "DC", "District of Columbia";
    Florida => "FL", "Florida";
    Georgia => "GA", "Georgia";
    Hawaii => "HI", "Hawaii";
    Idaho => "ID", "Idaho";
    Illinois => "IL", "Illinois";
    Indiana => "IN", "Indiana";
    Iowa => "IA", "Iowa";
    Kansas => "KS", "Kansas";
    Kentucky => "KY", "Kentucky";
    Louisiana => "LA", "Louisiana";
    Maine => "ME", "Maine";
    Maryland => "MD", "Maryland";
    Massachusetts => "MA", "Massachusetts";
    Michigan => "MI", "Michigan";
    Minnesota => "MN", "Minnesota";
    Mississippi => "MS", "Mississippi";
    Missouri => "MO", "Missouri";
    Montana => "MT", "Montana";
    Nebraska => "NE", "Nebraska";
    Nevada => "NV", "Nevada";
    NewHampshire => "NH", "New Hampshire";
    NewJersey => "NJ", "New Jersey";
    NewMexico => "NM", "New Mexico";
    NewYork => "NY", "New York";
    NorthCarolina => "NC", "North Carolina";
    NorthDakota => "ND", "North Dakota";
    Ohio => "OH", "Ohio";
    Oklahoma => "OK", "Oklahoma";
    Oregon => "OR", "Oregon";
    Pennsylvania => "PA", "Pennsylvania";
    RhodeIsland => "RI", "Rhode Island";
    SouthCarolina => "SC", "South Carolina";
    SouthDakota => "SD", "South Dakota";
    Tennessee => "TN", "Tennessee";
    Texas => "TX", "Texas";
    Utah => "UT", "Utah";
    Vermont => "VT", "Vermont";
    Virginia => "VA", "Virginia";
    Washington => "WA", "Washington";
    WestVirginia => "WV", "West Virginia";
    Wisconsin => "WI", "Wisconsin";
    Wyoming => "WY", "Wyoming";
}

impl State {
    /// Exact, case-sensitive match on the full name.
    pub fn from_name(name: &str) -> Result<State, UnknownStateError> {
        State::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| UnknownStateError::new(name))
    }

    /// Two-letter code, ASCII case-insensitive.
    pub fn from_code(code: &str) -> Result<State, UnknownStateError> {
        State::ALL
            .iter()
            .copied()
            .find(|s| s.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownStateError::new(code))
    }

    /// Accept either a full name or a two-letter code.
    pub fn parse(identifier: &str) -> Result<State, UnknownStateError> {
        let id = identifier.trim();
        State::from_name(id)
            .or_else(|_| State::from_code(id))
            .map_err(|_| UnknownStateError::new(identifier))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::parse(s)
    }
}
