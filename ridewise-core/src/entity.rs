//! Static attraction metadata served by the park data provider.

use geo::Coord;

/// Classification of an entity in the provider's park catalogue.
///
/// Only [`EntityType::Attraction`] entries are eligible for recommendation;
/// the remaining kinds are carried through so callers can report what was
/// filtered out. Wire values the provider adds later deserialise as
/// [`EntityType::Other`].
///
/// # Examples
/// ```
/// use ridewise_core::EntityType;
///
/// assert_eq!(EntityType::Attraction.as_str(), "ATTRACTION");
/// assert_eq!(EntityType::Show.to_string(), "SHOW");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EntityType {
    /// A ride or experience.
    Attraction,
    /// A scheduled show or performance.
    Show,
    /// A dining location.
    Restaurant,
    /// Anything else the provider lists (shops, meet-and-greets, ...).
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

impl EntityType {
    /// Return the provider's wire spelling of the entity type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attraction => "ATTRACTION",
            Self::Show => "SHOW",
            Self::Restaurant => "RESTAURANT",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static record for a single park entity.
///
/// Sourced from the provider's "children" listing per request; the engine
/// never caches entities across requests. `location` is optional because
/// the upstream catalogue omits coordinates for some entries; such
/// entities are excluded from every snapshot (they cannot be ranked by
/// walking distance).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ridewise_core::{AttractionEntity, EntityType};
///
/// let entity = AttractionEntity::new(
///     "75ea578a",
///     "Space Mountain",
///     EntityType::Attraction,
///     Some(Coord { x: -81.5781, y: 28.4190 }),
/// );
/// assert_eq!(entity.entity_type, EntityType::Attraction);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionEntity {
    /// Provider-unique identifier, shared with the live feed.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalogue classification.
    pub entity_type: EntityType,
    /// WGS84 position (`x` = longitude, `y` = latitude), when known.
    pub location: Option<Coord<f64>>,
}

impl AttractionEntity {
    /// Construct an entity record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entity_type: EntityType,
        location: Option<Coord<f64>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type,
            location,
        }
    }
}
