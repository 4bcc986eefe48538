use std::fmt;

use serde::{Deserialize, Serialize};

/// The CGMES profile families a model document can declare through `md:Model.profile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CgmesProfile {
    Eq,
    Ssh,
    Tp,
    Sv,
    Dy,
    Gl,
    Dl,
    TpBd,
    EqBd,
}

// Boundary markers come before the plain profile names they contain.
const URI_MARKERS: &[(&str, CgmesProfile)] = &[
    ("EquipmentBoundary", CgmesProfile::EqBd),
    ("TopologyBoundary", CgmesProfile::TpBd),
    ("Equipment", CgmesProfile::Eq),
    ("Operation", CgmesProfile::Eq),
    ("ShortCircuit", CgmesProfile::Eq),
    ("SteadyStateHypothesis", CgmesProfile::Ssh),
    ("Topology", CgmesProfile::Tp),
    ("StateVariables", CgmesProfile::Sv),
    ("Dynamics", CgmesProfile::Dy),
    ("GeographicalLocation", CgmesProfile::Gl),
    ("DiagramLayout", CgmesProfile::Dl),
];

impl CgmesProfile {
    /// Classifies a profile URI such as `http://entsoe.eu/CIM/EquipmentCore/3/1` (CGMES 2.4.15)
    /// or `http://iec.ch/TC57/ns/CIM/CoreEquipment-EU/3.0` (CGMES 3.0).
    pub fn from_uri(uri: &str) -> Option<CgmesProfile> {
        let path = uri.trim().trim_end_matches('/');
        let segment = if path.starts_with("http://entsoe.eu/CIM/") {
            path.trim_start_matches("http://entsoe.eu/CIM/").split('/').next()?
        } else {
            path.split('/').rev().find(|segment| segment.ends_with("-EU"))?
        };
        URI_MARKERS
            .iter()
            .find(|(marker, _)| segment.contains(marker))
            .map(|(_, profile)| *profile)
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            CgmesProfile::Eq => "EQ",
            CgmesProfile::Ssh => "SSH",
            CgmesProfile::Tp => "TP",
            CgmesProfile::Sv => "SV",
            CgmesProfile::Dy => "DY",
            CgmesProfile::Gl => "GL",
            CgmesProfile::Dl => "DL",
            CgmesProfile::TpBd => "TP_BD",
            CgmesProfile::EqBd => "EQ_BD",
        }
    }
}

impl fmt::Display for CgmesProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
