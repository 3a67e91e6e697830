//! Material catalog with sustainability attributes

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Sustainability attributes of a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    /// Kilograms of CO2 emitted per kilogram of material
    pub co2_per_kg: f64,
    /// 0 (landfill) to 10 (fully recyclable)
    pub recyclability: f64,
    /// 0 (fragile) to 10 (very durable)
    pub durability: f64,
    /// Relative density used to turn a part's volume into mass
    pub density: f64,
}

impl MaterialProperties {
    const fn new(co2_per_kg: f64, recyclability: f64, durability: f64, density: f64) -> Self {
        Self {
            co2_per_kg,
            recyclability,
            durability,
            density,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKind {
    Wood,
    Cardboard,
    Plastic,
    Metal,
    RecycledPlastic,
    FscRubberwood,
    BambooSolid,
    BambooFibreViscose,
    OrganicCotton,
    NaturalRubberLatex,
    TapiocaStarch,
    GuarXanthanGum,
    NaturalFoodColouring,
    RecycledCardboard,
    PlaSugarcane,
    RecycledAbs,
    RecycledPp,
    RecycledHdpe,
    RecycledPetFabrics,
    BioPe,
    BioPvc,
    RecycledPvc,
    RecycledAluminium,
    RecycledSteel,
    LiIonBatteries,
    GlassMarbles,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 26] = [
        MaterialKind::Wood,
        MaterialKind::Cardboard,
        MaterialKind::Plastic,
        MaterialKind::Metal,
        MaterialKind::RecycledPlastic,
        MaterialKind::FscRubberwood,
        MaterialKind::BambooSolid,
        MaterialKind::BambooFibreViscose,
        MaterialKind::OrganicCotton,
        MaterialKind::NaturalRubberLatex,
        MaterialKind::TapiocaStarch,
        MaterialKind::GuarXanthanGum,
        MaterialKind::NaturalFoodColouring,
        MaterialKind::RecycledCardboard,
        MaterialKind::PlaSugarcane,
        MaterialKind::RecycledAbs,
        MaterialKind::RecycledPp,
        MaterialKind::RecycledHdpe,
        MaterialKind::RecycledPetFabrics,
        MaterialKind::BioPe,
        MaterialKind::BioPvc,
        MaterialKind::RecycledPvc,
        MaterialKind::RecycledAluminium,
        MaterialKind::RecycledSteel,
        MaterialKind::LiIonBatteries,
        MaterialKind::GlassMarbles,
    ];

    /// The five materials offered for the basic bicycle parts
    pub const BASIC: [MaterialKind; 5] = [
        MaterialKind::Wood,
        MaterialKind::Cardboard,
        MaterialKind::Plastic,
        MaterialKind::Metal,
        MaterialKind::RecycledPlastic,
    ];

    /// Stable string identifier
    pub fn id(self) -> &'static str {
        match self {
            MaterialKind::Wood => "wood",
            MaterialKind::Cardboard => "cardboard",
            MaterialKind::Plastic => "plastic",
            MaterialKind::Metal => "metal",
            MaterialKind::RecycledPlastic => "recycled_plastic",
            MaterialKind::FscRubberwood => "fsc_rubberwood",
            MaterialKind::BambooSolid => "bamboo_solid",
            MaterialKind::BambooFibreViscose => "bamboo_fibre_viscose",
            MaterialKind::OrganicCotton => "organic_cotton",
            MaterialKind::NaturalRubberLatex => "natural_rubber_latex",
            MaterialKind::TapiocaStarch => "tapioca_starch",
            MaterialKind::GuarXanthanGum => "guar_xanthan_gum",
            MaterialKind::NaturalFoodColouring => "natural_food_colouring",
            MaterialKind::RecycledCardboard => "recycled_cardboard",
            MaterialKind::PlaSugarcane => "pla_sugarcane",
            MaterialKind::RecycledAbs => "recycled_abs",
            MaterialKind::RecycledPp => "recycled_pp",
            MaterialKind::RecycledHdpe => "recycled_hdpe",
            MaterialKind::RecycledPetFabrics => "recycled_pet_fabrics",
            MaterialKind::BioPe => "bio_pe",
            MaterialKind::BioPvc => "bio_pvc",
            MaterialKind::RecycledPvc => "recycled_pvc",
            MaterialKind::RecycledAluminium => "recycled_aluminium",
            MaterialKind::RecycledSteel => "recycled_steel",
            MaterialKind::LiIonBatteries => "li_ion_batteries",
            MaterialKind::GlassMarbles => "glass_marbles",
        }
    }

    /// Human readable name for UI display
    pub fn display_name(self) -> &'static str {
        match self {
            MaterialKind::Wood => "Wood",
            MaterialKind::Cardboard => "Cardboard",
            MaterialKind::Plastic => "Plastic",
            MaterialKind::Metal => "Metal",
            MaterialKind::RecycledPlastic => "Recycled Plastic",
            MaterialKind::FscRubberwood => "FSC Rubberwood",
            MaterialKind::BambooSolid => "Solid Bamboo",
            MaterialKind::BambooFibreViscose => "Bamboo Fibre Viscose",
            MaterialKind::OrganicCotton => "Organic Cotton",
            MaterialKind::NaturalRubberLatex => "Natural Rubber Latex",
            MaterialKind::TapiocaStarch => "Tapioca Starch",
            MaterialKind::GuarXanthanGum => "Guar & Xanthan Gum",
            MaterialKind::NaturalFoodColouring => "Natural Food Colouring",
            MaterialKind::RecycledCardboard => "Recycled Cardboard",
            MaterialKind::PlaSugarcane => "PLA (Sugarcane)",
            MaterialKind::RecycledAbs => "Recycled ABS",
            MaterialKind::RecycledPp => "Recycled PP",
            MaterialKind::RecycledHdpe => "Recycled HDPE",
            MaterialKind::RecycledPetFabrics => "Recycled PET Fabrics",
            MaterialKind::BioPe => "Bio-PE",
            MaterialKind::BioPvc => "Bio-PVC",
            MaterialKind::RecycledPvc => "Recycled PVC",
            MaterialKind::RecycledAluminium => "Recycled Aluminium",
            MaterialKind::RecycledSteel => "Recycled Steel",
            MaterialKind::LiIonBatteries => "Li-ion Batteries",
            MaterialKind::GlassMarbles => "Glass Marbles",
        }
    }

    pub fn properties(self) -> MaterialProperties {
        match self {
            MaterialKind::Wood => MaterialProperties::new(1.8, 7.0, 7.0, 0.6),
            MaterialKind::Cardboard => MaterialProperties::new(1.2, 9.0, 3.0, 0.2),
            MaterialKind::Plastic => MaterialProperties::new(3.0, 3.0, 8.0, 0.9),
            MaterialKind::Metal => MaterialProperties::new(4.5, 8.0, 10.0, 7.5),
            MaterialKind::RecycledPlastic => MaterialProperties::new(1.8, 7.0, 7.0, 0.9),
            MaterialKind::FscRubberwood => MaterialProperties::new(1.1, 8.0, 7.0, 0.65),
            MaterialKind::BambooSolid => MaterialProperties::new(0.9, 8.0, 8.0, 0.7),
            MaterialKind::BambooFibreViscose => MaterialProperties::new(2.2, 5.0, 5.0, 1.5),
            MaterialKind::OrganicCotton => MaterialProperties::new(1.6, 6.0, 4.0, 1.5),
            MaterialKind::NaturalRubberLatex => MaterialProperties::new(1.4, 5.0, 7.0, 0.95),
            MaterialKind::TapiocaStarch => MaterialProperties::new(0.8, 9.0, 2.0, 1.5),
            MaterialKind::GuarXanthanGum => MaterialProperties::new(1.0, 9.0, 1.0, 1.2),
            MaterialKind::NaturalFoodColouring => MaterialProperties::new(0.6, 9.0, 1.0, 1.0),
            MaterialKind::RecycledCardboard => MaterialProperties::new(0.7, 10.0, 3.0, 0.2),
            MaterialKind::PlaSugarcane => MaterialProperties::new(1.3, 5.0, 5.0, 1.25),
            MaterialKind::RecycledAbs => MaterialProperties::new(1.9, 6.0, 8.0, 1.05),
            MaterialKind::RecycledPp => MaterialProperties::new(1.4, 7.0, 7.0, 0.9),
            MaterialKind::RecycledHdpe => MaterialProperties::new(1.3, 8.0, 8.0, 0.95),
            MaterialKind::RecycledPetFabrics => MaterialProperties::new(1.5, 6.0, 6.0, 1.38),
            MaterialKind::BioPe => MaterialProperties::new(1.0, 7.0, 7.0, 0.95),
            MaterialKind::BioPvc => MaterialProperties::new(2.0, 4.0, 8.0, 1.38),
            MaterialKind::RecycledPvc => MaterialProperties::new(1.7, 5.0, 8.0, 1.38),
            MaterialKind::RecycledAluminium => MaterialProperties::new(0.8, 10.0, 9.0, 2.7),
            MaterialKind::RecycledSteel => MaterialProperties::new(1.1, 10.0, 10.0, 7.85),
            MaterialKind::LiIonBatteries => MaterialProperties::new(12.5, 4.0, 6.0, 2.5),
            MaterialKind::GlassMarbles => MaterialProperties::new(0.9, 9.0, 9.0, 2.5),
        }
    }

    /// RGBA base colour handed to the renderer
    pub fn base_color(self) -> [f32; 4] {
        match self {
            MaterialKind::Wood | MaterialKind::FscRubberwood => [0.62, 0.44, 0.26, 1.0],
            MaterialKind::Cardboard | MaterialKind::RecycledCardboard => [0.76, 0.63, 0.45, 1.0],
            MaterialKind::Plastic | MaterialKind::BioPe | MaterialKind::BioPvc => {
                [0.48, 0.60, 0.06, 1.0]
            }
            MaterialKind::Metal | MaterialKind::RecycledSteel => [0.66, 0.67, 0.70, 1.0],
            MaterialKind::RecycledAluminium => [0.80, 0.81, 0.83, 1.0],
            MaterialKind::RecycledPlastic
            | MaterialKind::RecycledAbs
            | MaterialKind::RecycledPp
            | MaterialKind::RecycledHdpe
            | MaterialKind::RecycledPvc => [0.30, 0.74, 0.58, 1.0],
            MaterialKind::BambooSolid | MaterialKind::BambooFibreViscose => {
                [0.85, 0.76, 0.47, 1.0]
            }
            MaterialKind::OrganicCotton | MaterialKind::RecycledPetFabrics => {
                [0.95, 0.93, 0.88, 1.0]
            }
            MaterialKind::NaturalRubberLatex => [0.20, 0.18, 0.16, 1.0],
            MaterialKind::TapiocaStarch | MaterialKind::GuarXanthanGum => [0.97, 0.95, 0.90, 1.0],
            MaterialKind::NaturalFoodColouring => [0.91, 0.35, 0.42, 1.0],
            MaterialKind::PlaSugarcane => [0.93, 0.90, 0.78, 1.0],
            MaterialKind::LiIonBatteries => [0.13, 0.20, 0.56, 1.0],
            MaterialKind::GlassMarbles => [0.55, 0.80, 0.92, 0.6],
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MaterialKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .iter()
            .copied()
            .find(|m| m.id() == s)
            .ok_or_else(|| CatalogError::UnknownMaterial(s.to_string()))
    }
}
