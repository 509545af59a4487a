//! Seat-map description consumed by the layout estimator
//!
//! A seat map is immutable input owned by the caller. It is usually shaped
//! from a backend response, so deserialization is lenient: missing or
//! malformed numeric fields degrade to `0` and unknown enum tags fall back
//! to a neutral value instead of rejecting the whole document.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Venue layout family that selects the geometric layout formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    Stadium,
    Cinema,
    Theater,
    Concert,
    #[default]
    Generic,
}

impl Topology {
    /// Reads a topology tag case-insensitively
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "stadium" => Some(Topology::Stadium),
            "cinema" => Some(Topology::Cinema),
            "theater" => Some(Topology::Theater),
            "concert" => Some(Topology::Concert),
            "generic" => Some(Topology::Generic),
            _ => None,
        }
    }
}

/// Placement tag of a section relative to the venue's center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionPosition {
    North,
    South,
    East,
    West,
    Vip,
    Other,
}

impl SectionPosition {
    /// Reads a placement tag case-insensitively; unrecognized tags are `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "north" => SectionPosition::North,
            "south" => SectionPosition::South,
            "east" => SectionPosition::East,
            "west" => SectionPosition::West,
            "vip" => SectionPosition::Vip,
            _ => SectionPosition::Other,
        }
    }

    /// Returns true for cardinal and VIP tags, the ones that occupy a
    /// tribune slot around a stadium field
    pub fn is_tribune_tag(&self) -> bool {
        !matches!(self, SectionPosition::Other)
    }
}

/// Geometry of a single seating block
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGeometry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub rows: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub seats_per_row: u32,
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: Option<SectionPosition>,
}

impl SectionGeometry {
    /// Creates an untagged section
    pub fn new(id: impl Into<String>, rows: u32, seats_per_row: u32) -> Self {
        Self {
            id: id.into(),
            rows,
            seats_per_row,
            position: None,
        }
    }

    /// Sets the placement tag
    pub fn with_position(mut self, position: SectionPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Number of seat cells in the block (`rows * seatsPerRow`)
    pub fn seat_units(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.seats_per_row)
    }

    /// Returns true if the section carries a cardinal or VIP tag
    pub fn has_tribune_tag(&self) -> bool {
        self.position.is_some_and(|p| p.is_tribune_tag())
    }
}

/// Errors produced while reading a seat-map document
#[derive(Debug, Error)]
pub enum SeatMapError {
    #[error("Seat map document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Immutable description of a venue's seat map
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SeatMapDescription {
    #[serde(default, deserialize_with = "lenient_topology")]
    pub topology: Topology,
    #[serde(default)]
    pub sections: Vec<SectionGeometry>,
}

impl SeatMapDescription {
    /// Creates a seat map from its parts
    pub fn new(topology: Topology, sections: Vec<SectionGeometry>) -> Self {
        Self { topology, sections }
    }

    /// Parses a seat-map document
    ///
    /// # Example
    /// ```rust
    /// use seatmap_viewport::domain::seat_map::{SeatMapDescription, Topology};
    ///
    /// let map = SeatMapDescription::from_json(
    ///     r#"{"topology":"cinema","sections":[{"id":"A","rows":10,"seatsPerRow":15}]}"#,
    /// ).unwrap();
    /// assert_eq!(map.topology, Topology::Cinema);
    /// assert_eq!(map.total_seats(), 150);
    /// ```
    pub fn from_json(input: &str) -> Result<Self, SeatMapError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Returns true if the map has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Largest `rows` value over all sections, 0 for an empty map
    pub fn max_rows(&self) -> u32 {
        self.sections.iter().map(|s| s.rows).max().unwrap_or(0)
    }

    /// Largest `seatsPerRow` value over all sections, 0 for an empty map
    pub fn max_seats_per_row(&self) -> u32 {
        self.sections.iter().map(|s| s.seats_per_row).max().unwrap_or(0)
    }

    /// Total number of seat cells over all sections
    pub fn total_seats(&self) -> u64 {
        self.sections.iter().map(SectionGeometry::seat_units).sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Float(f64),
    Other(serde::de::IgnoredAny),
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match RawCount::deserialize(deserializer)? {
        RawCount::Int(value) if value >= 0 => u32::try_from(value).unwrap_or(u32::MAX),
        // `as` saturates for floats
        RawCount::Float(value) if value.is_finite() && value >= 0.0 => value as u32,
        RawCount::Int(_) | RawCount::Float(_) | RawCount::Other(_) => {
            tracing::warn!("malformed seat count in seat map, treating it as 0");
            0
        }
    };
    Ok(count)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Other(serde::de::IgnoredAny),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Int(id) => id.to_string(),
        RawId::Other(_) => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_topology<'de, D>(deserializer: D) -> Result<Topology, D::Error>
where
    D: Deserializer<'de>,
{
    let topology = match Option::<RawTag>::deserialize(deserializer)? {
        None => Topology::default(),
        Some(RawTag::Text(tag)) => Topology::from_tag(&tag).unwrap_or_else(|| {
            tracing::warn!(%tag, "unknown seat map topology, using the generic layout");
            Topology::Generic
        }),
        Some(RawTag::Other(_)) => {
            tracing::warn!("malformed seat map topology, using the generic layout");
            Topology::Generic
        }
    };
    Ok(topology)
}

fn lenient_position<'de, D>(deserializer: D) -> Result<Option<SectionPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawTag>::deserialize(deserializer)? {
        None => None,
        Some(RawTag::Text(tag)) => Some(SectionPosition::from_tag(&tag)),
        Some(RawTag::Other(_)) => {
            tracing::warn!("malformed section position in seat map, ignoring it");
            None
        }
    })
}
