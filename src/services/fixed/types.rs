//! Types for the fixed-position search route

/// Areal search intersection requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionType {
    /// Any overlap between the image and the search area
    #[default]
    ImageIntersectsArea,
    /// The image fully contains the search area
    ImageContainsArea,
    /// The search area fully contains the image
    AreaContainsImage,
}

impl IntersectionType {
    /// Query parameter value for this intersection type
    pub fn as_str(&self) -> &'static str {
        match self {
            IntersectionType::ImageIntersectsArea => "ImageIntersectsArea",
            IntersectionType::ImageContainsArea => "ImageContainsArea",
            IntersectionType::AreaContainsImage => "AreaContainsImage",
        }
    }
}

/// Parameters for a fixed-position search.
///
/// RA and Dec are passed through verbatim: the server accepts both
/// sexagesimal and decimal formats.
#[derive(Debug, Clone)]
pub struct FixedTargetQuery {
    /// Right ascension (sexagesimal or decimal; hour angle assumed
    /// when unitless)
    pub ra: String,
    /// Declination (sexagesimal or decimal; degrees assumed when unitless)
    pub dec: String,
    /// Restrict the search to these data sources
    pub sources: Vec<String>,
    /// Areal search radius around RA, Dec in arcminutes
    pub radius: Option<f64>,
    /// Intersection requirement for areal searches
    pub intersection_type: Option<IntersectionType>,
    /// Only observations taken after this date (YYYY-MM-DD, UTC)
    pub start_date: Option<String>,
    /// Only observations taken before this date (YYYY-MM-DD, UTC)
    pub stop_date: Option<String>,
}

impl FixedTargetQuery {
    /// Create a query for the given sky position
    pub fn new(ra: impl Into<String>, dec: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
            sources: Vec::new(),
            radius: None,
            intersection_type: None,
            start_date: None,
            stop_date: None,
        }
    }

    /// Add a data source to search
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Set the areal search radius in arcminutes
    pub fn with_radius(mut self, arcmin: f64) -> Self {
        self.radius = Some(arcmin);
        self
    }

    /// Set the areal intersection requirement
    pub fn with_intersection_type(mut self, intersection_type: IntersectionType) -> Self {
        self.intersection_type = Some(intersection_type);
        self
    }

    /// Set the start date (YYYY-MM-DD, UTC)
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the stop date (YYYY-MM-DD, UTC)
    pub fn with_stop_date(mut self, date: impl Into<String>) -> Self {
        self.stop_date = Some(date.into());
        self
    }
}
