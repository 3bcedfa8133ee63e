use crate::config::{
    FOD_DEFAULT_SIZE, FOD_DEFAULT_X, FOD_DEFAULT_Y, PROP_FOD_LOCATION, PROP_FOD_SIZE,
};
use log::{info, warn};
use shim_misc::props::{PropertySource, parse_int_list};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryWarning {
    UnexpectedProperty(&'static str),
    NotSquare { width: i32, height: i32 },
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedProperty(key) => {
                write!(f, "property '{key}' does not exist or has an unexpected value")
            }
            Self::NotSquare { width, height } => write!(
                f,
                "FoD size should be square but it is not (width = {width}, height = {height})"
            ),
        }
    }
}

fn int_pair<S: PropertySource + ?Sized>(
    source: &S,
    key: &'static str,
    default: [i32; 2],
    warnings: &mut Vec<GeometryWarning>,
) -> [i32; 2] {
    let value = source.get(key).unwrap_or_default();

    match parse_int_list(&value, 2) {
        Some(values) => [values[0], values[1]],
        None => {
            warnings.push(GeometryWarning::UnexpectedProperty(key));
            default
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: FOD_DEFAULT_X,
            y: FOD_DEFAULT_Y,
            size: FOD_DEFAULT_SIZE,
        }
    }
}

impl Geometry {
    /// Resolves the sensor geometry, returning whatever was wrong with the properties.
    pub fn resolve<S: PropertySource + ?Sized>(source: &S) -> (Self, Vec<GeometryWarning>) {
        let mut warnings = Vec::new();

        let [x, y] = int_pair(
            source,
            PROP_FOD_LOCATION,
            [FOD_DEFAULT_X, FOD_DEFAULT_Y],
            &mut warnings,
        );

        let [width, height] = int_pair(
            source,
            PROP_FOD_SIZE,
            [FOD_DEFAULT_SIZE, FOD_DEFAULT_SIZE],
            &mut warnings,
        );

        if width != height {
            warnings.push(GeometryWarning::NotSquare { width, height });
        }

        let geometry = Self {
            x,
            y,
            size: width.max(height),
        };

        (geometry, warnings)
    }

    pub fn from_properties<S: PropertySource + ?Sized>(source: &S) -> Self {
        let (geometry, warnings) = Self::resolve(source);

        for warning in &warnings {
            warn!("{warning}");
        }

        info!(
            "FoD is located at {},{} with size {} pixels",
            geometry.x, geometry.y, geometry.size
        );

        geometry
    }
}
