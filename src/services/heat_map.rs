use serde::Serialize;

/// Корзины тепловой карты, от самых популярных к наименее популярным.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatMapColor {
    Gold,
    Orange,
    HotPink,
    MediumPurple,
    Indigo,
}

impl HeatMapColor {
    pub const ALL: [HeatMapColor; 5] = [
        HeatMapColor::Gold,
        HeatMapColor::Orange,
        HeatMapColor::HotPink,
        HeatMapColor::MediumPurple,
        HeatMapColor::Indigo,
    ];

    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => HeatMapColor::Gold,
            60..=79 => HeatMapColor::Orange,
            40..=59 => HeatMapColor::HotPink,
            20..=39 => HeatMapColor::MediumPurple,
            _ => HeatMapColor::Indigo,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            HeatMapColor::Gold => "#FFD700",
            HeatMapColor::Orange => "#FFA500",
            HeatMapColor::HotPink => "#FF69B4",
            HeatMapColor::MediumPurple => "#9370DB",
            HeatMapColor::Indigo => "#4B0082",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeatMapColor::Gold => "Most Popular (80-100)",
            HeatMapColor::Orange => "High Demand (60-79)",
            HeatMapColor::HotPink => "Moderate (40-59)",
            HeatMapColor::MediumPurple => "Low Demand (20-39)",
            HeatMapColor::Indigo => "Least Popular (0-19)",
        }
    }

    pub fn style(&self) -> String {
        format!("background: {} !important;", self.hex())
    }
}
