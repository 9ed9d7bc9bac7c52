use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 27 administrative regions of the sales territory.
///
/// This is a closed, process-wide constant table. Region-based aggregates are
/// left-joined against it so their output always has full coverage, even for
/// regions with no sales in the current dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl Region {
    /// Every known region, in code order. Exactly 27 entries.
    pub const ALL: [Region; 27] = [
        Region::Ac,
        Region::Al,
        Region::Ap,
        Region::Am,
        Region::Ba,
        Region::Ce,
        Region::Df,
        Region::Es,
        Region::Go,
        Region::Ma,
        Region::Mt,
        Region::Ms,
        Region::Mg,
        Region::Pa,
        Region::Pb,
        Region::Pr,
        Region::Pe,
        Region::Pi,
        Region::Rj,
        Region::Rn,
        Region::Rs,
        Region::Ro,
        Region::Rr,
        Region::Sc,
        Region::Sp,
        Region::Se,
        Region::To,
    ];

    /// The two-letter region code.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Ac => "AC",
            Region::Al => "AL",
            Region::Ap => "AP",
            Region::Am => "AM",
            Region::Ba => "BA",
            Region::Ce => "CE",
            Region::Df => "DF",
            Region::Es => "ES",
            Region::Go => "GO",
            Region::Ma => "MA",
            Region::Mt => "MT",
            Region::Ms => "MS",
            Region::Mg => "MG",
            Region::Pa => "PA",
            Region::Pb => "PB",
            Region::Pr => "PR",
            Region::Pe => "PE",
            Region::Pi => "PI",
            Region::Rj => "RJ",
            Region::Rn => "RN",
            Region::Rs => "RS",
            Region::Ro => "RO",
            Region::Rr => "RR",
            Region::Sc => "SC",
            Region::Sp => "SP",
            Region::Se => "SE",
            Region::To => "TO",
        }
    }

    /// The (latitude, longitude) pair used for map-based outputs.
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Region::Ac => (-9.97, -67.81),
            Region::Al => (-9.65, -35.73),
            Region::Ap => (0.03, -51.07),
            Region::Am => (-3.10, -60.02),
            Region::Ba => (-12.97, -38.50),
            Region::Ce => (-3.72, -38.54),
            Region::Df => (-15.78, -47.93),
            Region::Es => (-20.32, -40.34),
            Region::Go => (-16.68, -49.25),
            Region::Ma => (-2.53, -44.30),
            Region::Mt => (-15.60, -56.10),
            Region::Ms => (-20.44, -54.65),
            Region::Mg => (-19.92, -43.94),
            Region::Pa => (-1.46, -48.49),
            Region::Pb => (-7.12, -34.86),
            Region::Pr => (-25.43, -49.27),
            Region::Pe => (-8.05, -34.90),
            Region::Pi => (-5.09, -42.80),
            Region::Rj => (-22.91, -43.17),
            Region::Rn => (-5.79, -35.21),
            Region::Rs => (-30.03, -51.23),
            Region::Ro => (-8.76, -63.90),
            Region::Rr => (2.82, -60.67),
            Region::Sc => (-27.59, -48.55),
            Region::Sp => (-23.55, -46.63),
            Region::Se => (-10.91, -37.07),
            Region::To => (-10.18, -48.33),
        }
    }

    /// Parses a region code, case-insensitively.
    pub fn from_code(code: &str) -> Result<Region, CoreError> {
        let upper = code.trim().to_ascii_uppercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.code() == upper)
            .ok_or_else(|| CoreError::UnknownRegion(code.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_code(s)
    }
}
