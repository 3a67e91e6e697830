//! Component catalog and the closed mapping from component to shape

use std::fmt;
use std::str::FromStr;

use super::MaterialKind;
use crate::error::CatalogError;
use crate::math::{Aabb, Vec3};

// Flat shapes still get a little thickness so they have a usable bounding box.
const FLAT_THICKNESS: f64 = 0.02;

/// Nominal geometry of a component, centred on its local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Cone { radius: f64, height: f64 },
    Capsule { radius: f64, length: f64 },
    /// Ring-shaped solid standing upright in the XY plane
    Torus { radius: f64, tube: f64 },
    /// Flat disc lying in the XZ plane
    Disc { radius: f64 },
    /// Flat ring lying in the XZ plane
    Annulus { inner: f64, outer: f64 },
    /// Flat rectangle lying in the XZ plane
    Plane { width: f64, depth: f64 },
    /// Regular solid with the given circumradius
    Polyhedron { radius: f64, faces: u32 },
}

impl Shape {
    /// Full size of the shape along each axis
    pub fn extents(&self) -> Vec3 {
        match *self {
            Shape::Cuboid {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Shape::Sphere { radius } | Shape::Polyhedron { radius, .. } => {
                Vec3::new(2.0 * radius, 2.0 * radius, 2.0 * radius)
            }
            Shape::Cylinder { radius, height } | Shape::Cone { radius, height } => {
                Vec3::new(2.0 * radius, height, 2.0 * radius)
            }
            Shape::Capsule { radius, length } => {
                Vec3::new(2.0 * radius, length + 2.0 * radius, 2.0 * radius)
            }
            Shape::Torus { radius, tube } => {
                let outer = 2.0 * (radius + tube);
                Vec3::new(outer, outer, 2.0 * tube)
            }
            Shape::Disc { radius } | Shape::Annulus { outer: radius, .. } => {
                Vec3::new(2.0 * radius, FLAT_THICKNESS, 2.0 * radius)
            }
            Shape::Plane { width, depth } => Vec3::new(width, FLAT_THICKNESS, depth),
        }
    }

    /// Local-space bounding box centred on the origin
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_center_size(Vec3::new(0.0, 0.0, 0.0), self.extents())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    // Bicycle and toy parts
    Frame,
    BicycleWheel,
    Seat,
    Handlebar,
    Lego,
    CarWheel,
    Battery,
    // Primitives
    Box,
    Sphere,
    Cylinder,
    Cone,
    Capsule,
    Torus,
    TorusKnot,
    Circle,
    Ring,
    Plane,
    // Polyhedra
    Tetrahedron,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    // Procedural
    Tube,
    Lathe,
    Extrude,
    Shape,
    Polyhedron,
    Edges,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 27] = [
        ComponentKind::Frame,
        ComponentKind::BicycleWheel,
        ComponentKind::Seat,
        ComponentKind::Handlebar,
        ComponentKind::Lego,
        ComponentKind::CarWheel,
        ComponentKind::Battery,
        ComponentKind::Box,
        ComponentKind::Sphere,
        ComponentKind::Cylinder,
        ComponentKind::Cone,
        ComponentKind::Capsule,
        ComponentKind::Torus,
        ComponentKind::TorusKnot,
        ComponentKind::Circle,
        ComponentKind::Ring,
        ComponentKind::Plane,
        ComponentKind::Tetrahedron,
        ComponentKind::Octahedron,
        ComponentKind::Dodecahedron,
        ComponentKind::Icosahedron,
        ComponentKind::Tube,
        ComponentKind::Lathe,
        ComponentKind::Extrude,
        ComponentKind::Shape,
        ComponentKind::Polyhedron,
        ComponentKind::Edges,
    ];

    /// Stable string identifier
    pub fn id(self) -> &'static str {
        match self {
            ComponentKind::Frame => "frame",
            ComponentKind::BicycleWheel => "bicycle_wheel",
            ComponentKind::Seat => "seat",
            ComponentKind::Handlebar => "handlebar",
            ComponentKind::Lego => "lego",
            ComponentKind::CarWheel => "car_wheel",
            ComponentKind::Battery => "battery",
            ComponentKind::Box => "box",
            ComponentKind::Sphere => "sphere",
            ComponentKind::Cylinder => "cylinder",
            ComponentKind::Cone => "cone",
            ComponentKind::Capsule => "capsule",
            ComponentKind::Torus => "torus",
            ComponentKind::TorusKnot => "torus_knot",
            ComponentKind::Circle => "circle",
            ComponentKind::Ring => "ring",
            ComponentKind::Plane => "plane",
            ComponentKind::Tetrahedron => "tetrahedron",
            ComponentKind::Octahedron => "octahedron",
            ComponentKind::Dodecahedron => "dodecahedron",
            ComponentKind::Icosahedron => "icosahedron",
            ComponentKind::Tube => "tube",
            ComponentKind::Lathe => "lathe",
            ComponentKind::Extrude => "extrude",
            ComponentKind::Shape => "shape",
            ComponentKind::Polyhedron => "polyhedron",
            ComponentKind::Edges => "edges",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComponentKind::Frame => "Frame",
            ComponentKind::BicycleWheel => "Wheels",
            ComponentKind::Seat => "Seat",
            ComponentKind::Handlebar => "Handlebar",
            ComponentKind::Lego => "Lego",
            ComponentKind::CarWheel => "Car wheel",
            ComponentKind::Battery => "Battery",
            ComponentKind::Box => "Box",
            ComponentKind::Sphere => "Sphere",
            ComponentKind::Cylinder => "Cylinder",
            ComponentKind::Cone => "Cone",
            ComponentKind::Capsule => "Capsule",
            ComponentKind::Torus => "Torus",
            ComponentKind::TorusKnot => "Torus knot",
            ComponentKind::Circle => "Circle",
            ComponentKind::Ring => "Ring",
            ComponentKind::Plane => "Plane",
            ComponentKind::Tetrahedron => "Tetrahedron",
            ComponentKind::Octahedron => "Octahedron",
            ComponentKind::Dodecahedron => "Dodecahedron",
            ComponentKind::Icosahedron => "Icosahedron",
            ComponentKind::Tube => "Tube",
            ComponentKind::Lathe => "Lathe",
            ComponentKind::Extrude => "Extrusion",
            ComponentKind::Shape => "Shape",
            ComponentKind::Polyhedron => "Polyhedron",
            ComponentKind::Edges => "Edges",
        }
    }

    /// Relative amount of material the part uses
    pub fn volume_factor(self) -> f64 {
        match self {
            ComponentKind::Frame => 3.0,
            ComponentKind::BicycleWheel => 2.0,
            _ => 1.0,
        }
    }

    /// Material a freshly added part starts with
    pub fn default_material(self) -> MaterialKind {
        match self {
            ComponentKind::Frame | ComponentKind::Handlebar => MaterialKind::Wood,
            ComponentKind::Seat
            | ComponentKind::Box
            | ComponentKind::Circle
            | ComponentKind::Plane
            | ComponentKind::Shape => MaterialKind::Cardboard,
            ComponentKind::Edges => MaterialKind::Metal,
            ComponentKind::Battery => MaterialKind::RecycledAluminium,
            _ => MaterialKind::Plastic,
        }
    }

    /// Materials the part may be built from
    pub fn allowed_materials(self) -> &'static [MaterialKind] {
        use MaterialKind::*;
        match self {
            ComponentKind::Frame => &[Wood, Cardboard, Plastic, Metal, RecycledPlastic],
            ComponentKind::BicycleWheel => &[Plastic, Metal, RecycledPlastic],
            ComponentKind::Seat => &[Wood, Cardboard, Plastic, RecycledPlastic],
            ComponentKind::Handlebar => &[Wood, Plastic, Metal, RecycledPlastic],
            ComponentKind::Lego | ComponentKind::CarWheel => &[Plastic],
            _ => &MaterialKind::ALL,
        }
    }

    /// Total mapping from component to nominal shape
    pub fn shape(self) -> Shape {
        match self {
            ComponentKind::Frame => Shape::Cuboid {
                width: 3.0,
                height: 1.0,
                depth: 1.0,
            },
            ComponentKind::BicycleWheel => Shape::Torus {
                radius: 1.0,
                tube: 0.3,
            },
            ComponentKind::Seat => Shape::Cylinder {
                radius: 0.6,
                height: 0.2,
            },
            ComponentKind::Handlebar => Shape::Capsule {
                radius: 0.1,
                length: 1.6,
            },
            ComponentKind::Lego => Shape::Cuboid {
                width: 0.8,
                height: 0.4,
                depth: 0.4,
            },
            ComponentKind::CarWheel => Shape::Cylinder {
                radius: 0.5,
                height: 0.3,
            },
            ComponentKind::Battery => Shape::Cuboid {
                width: 0.4,
                height: 0.8,
                depth: 0.4,
            },
            ComponentKind::Box
            | ComponentKind::Tube
            | ComponentKind::Lathe
            | ComponentKind::Extrude
            | ComponentKind::Shape
            | ComponentKind::Edges => Shape::Cuboid {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            ComponentKind::Sphere => Shape::Sphere { radius: 0.5 },
            ComponentKind::Cylinder => Shape::Cylinder {
                radius: 0.5,
                height: 1.0,
            },
            ComponentKind::Cone => Shape::Cone {
                radius: 0.5,
                height: 1.0,
            },
            ComponentKind::Capsule => Shape::Capsule {
                radius: 0.3,
                length: 0.6,
            },
            ComponentKind::Torus => Shape::Torus {
                radius: 0.5,
                tube: 0.2,
            },
            ComponentKind::TorusKnot => Shape::Torus {
                radius: 0.5,
                tube: 0.25,
            },
            ComponentKind::Circle => Shape::Disc { radius: 0.5 },
            ComponentKind::Ring => Shape::Annulus {
                inner: 0.25,
                outer: 0.5,
            },
            ComponentKind::Plane => Shape::Plane {
                width: 1.0,
                depth: 1.0,
            },
            ComponentKind::Tetrahedron => Shape::Polyhedron {
                radius: 0.5,
                faces: 4,
            },
            ComponentKind::Octahedron => Shape::Polyhedron {
                radius: 0.5,
                faces: 8,
            },
            ComponentKind::Dodecahedron => Shape::Polyhedron {
                radius: 0.5,
                faces: 12,
            },
            ComponentKind::Icosahedron | ComponentKind::Polyhedron => Shape::Polyhedron {
                radius: 0.5,
                faces: 20,
            },
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ComponentKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older asset names
        match s {
            "wheel" => return Ok(ComponentKind::BicycleWheel),
            "torusKnot" => return Ok(ComponentKind::TorusKnot),
            _ => {}
        }

        ComponentKind::ALL
            .iter()
            .copied()
            .find(|c| c.id() == s)
            .ok_or_else(|| CatalogError::UnknownComponent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for c in ComponentKind::ALL {
            assert_eq!(c.id().parse::<ComponentKind>().unwrap(), c);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("wheel".parse::<ComponentKind>(), Ok(ComponentKind::BicycleWheel));
        assert_eq!("torusKnot".parse::<ComponentKind>(), Ok(ComponentKind::TorusKnot));
        assert!("spaceship".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_every_shape_has_positive_extents() {
        for c in ComponentKind::ALL {
            let e = c.shape().extents();
            assert!(e.x > 0.0 && e.y > 0.0 && e.z > 0.0, "{c}");
        }
    }

    #[test]
    fn test_default_material_is_allowed() {
        for c in ComponentKind::ALL {
            assert!(
                c.allowed_materials().contains(&c.default_material()),
                "{c} default material not allowed"
            );
        }
    }

    #[test]
    fn test_frame_bounds() {
        let b = ComponentKind::Frame.shape().local_bounds();
        assert_eq!(b.min, Vec3::new(-1.5, -0.5, -0.5));
        assert_eq!(b.max, Vec3::new(1.5, 0.5, 0.5));
    }
}
