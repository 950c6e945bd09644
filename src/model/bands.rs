use serde::Serialize;

/// Percentile ranges used to colour results, bounded above inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileBand {
    VeryLow,
    Low,
    Average,
    High,
    VeryHigh,
}

impl PercentileBand {
    pub const ALL: [PercentileBand; 5] = [
        PercentileBand::VeryLow,
        PercentileBand::Low,
        PercentileBand::Average,
        PercentileBand::High,
        PercentileBand::VeryHigh,
    ];

    /// `None` above 100 or for NaN.
    pub fn classify(percentile: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|band| percentile <= band.upper_bound())
    }

    pub fn lower_bound(self) -> f64 {
        match self {
            PercentileBand::VeryLow => 0.0,
            PercentileBand::Low => 3.0,
            PercentileBand::Average => 15.0,
            PercentileBand::High => 85.0,
            PercentileBand::VeryHigh => 97.0,
        }
    }

    pub fn upper_bound(self) -> f64 {
        match self {
            PercentileBand::VeryLow => 3.0,
            PercentileBand::Low => 15.0,
            PercentileBand::Average => 85.0,
            PercentileBand::High => 97.0,
            PercentileBand::VeryHigh => 100.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PercentileBand::VeryLow => "0-3",
            PercentileBand::Low => "3-15",
            PercentileBand::Average => "15-85",
            PercentileBand::High => "85-97",
            PercentileBand::VeryHigh => "97-100",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PercentileBand::VeryLow => (0xd4, 0x46, 0x46),
            PercentileBand::Low => (0xf5, 0xa7, 0x2f),
            PercentileBand::Average => (0x60, 0xcd, 0x72),
            PercentileBand::High => (0x8d, 0xdf, 0x9b),
            PercentileBand::VeryHigh => (0xae, 0xdf, 0xb6),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("{r:02X}{g:02X}{b:02X}")
    }
}
