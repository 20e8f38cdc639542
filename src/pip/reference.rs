//! Built-in MKAD (Moscow Ring Road) ring.
//!
//! One vertex per kilometre marker, listed clockwise starting from the
//! eastern side, as `(lat, lon)`.

use super::{BoundaryError, RingBoundary};

pub const MKAD_NAME: &str = "MKAD";

pub const MKAD_VERTICES: &[(f64, f64)] = &[
    (55.774558, 37.842762),
    (55.76522, 37.842789),
    (55.755723, 37.842627),
    (55.747399, 37.841828),
    (55.739103, 37.841217),
    (55.730482, 37.840175),
    (55.721939, 37.83916),
    (55.712203, 37.837121),
    (55.703048, 37.83262),
    (55.694287, 37.829512),
    (55.68529, 37.831353),
    (55.675945, 37.834605),
    (55.667752, 37.837597),
    (55.658667, 37.839348),
    (55.650053, 37.833842),
    (55.643713, 37.824787),
    (55.637347, 37.814564),
    (55.62913, 37.802473),
    (55.623758, 37.794235),
    (55.617713, 37.781928),
    (55.611755, 37.771139),
    (55.604956, 37.758725),
    (55.599677, 37.747945),
    (55.594143, 37.734785),
    (55.589234, 37.723062),
    (55.583983, 37.709425),
    (55.578834, 37.696256),
    (55.574019, 37.683167),
    (55.571999, 37.668911),
    (55.573093, 37.647765),
    (55.573928, 37.633419),
    (55.574732, 37.616719),
    (55.575816, 37.60107),
    (55.5778, 37.586536),
    (55.581271, 37.571938),
    (55.585143, 37.555732),
    (55.587509, 37.545132),
    (55.5922, 37.526366),
    (55.594728, 37.516108),
    (55.60249, 37.502274),
    (55.609685, 37.49391),
    (55.617424, 37.484846),
    (55.625801, 37.474638),
    (55.630207, 37.464227),
    (55.641041, 37.454396),
    (55.648794, 37.444994),
    (55.654675, 37.431184),
    (55.660424, 37.421854),
    (55.670701, 37.410321),
    (55.676512, 37.402679),
    (55.684767, 37.391315),
    (55.693102, 37.380046),
    (55.702012, 37.373806),
    (55.70983, 37.369231),
    (55.719023, 37.368554),
    (55.729019, 37.368011),
    (55.737969, 37.369255),
    (55.746702, 37.371013),
    (55.755743, 37.372749),
    (55.765158, 37.373549),
    (55.774158, 37.374083),
    (55.783458, 37.376393),
    (55.791832, 37.379608),
    (55.801012, 37.382689),
    (55.809624, 37.385712),
    (55.817872, 37.388998),
    (55.826281, 37.395024),
    (55.835163, 37.400894),
    (55.843546, 37.409078),
    (55.852053, 37.416741),
    (55.858962, 37.425638),
    (55.866254, 37.436069),
    (55.872565, 37.444707),
    (55.876744, 37.454011),
    (55.881802, 37.471082),
    (55.886201, 37.48798),
    (55.890091, 37.509209),
    (55.893943, 37.52456),
    (55.897767, 37.546418),
    (55.902057, 37.565301),
    (55.904979, 37.583561),
    (55.906788, 37.601087),
    (55.908139, 37.616934),
    (55.910129, 37.634476),
    (55.909867, 37.652346),
    (55.909339, 37.671145),
    (55.909154, 37.688809),
    (55.904879, 37.702659),
    (55.898994, 37.719006),
    (55.892891, 37.731928),
    (55.888009, 37.746218),
    (55.883037, 37.760461),
    (55.878023, 37.776035),
    (55.872769, 37.792285),
    (55.866788, 37.809264),
    (55.861167, 37.823612),
    (55.855155, 37.835289),
    (55.847014, 37.842689),
    (55.838043, 37.843924),
    (55.829305, 37.844299),
    (55.820431, 37.844469),
    (55.811331, 37.844633),
    (55.802391, 37.845151),
    (55.793435, 37.845367),
    (55.784506, 37.84475),
    (55.775609, 37.843467),
];

impl RingBoundary {
    /// The built-in MKAD ring
    pub fn mkad() -> Result<Self, BoundaryError> {
        Self::from_table(MKAD_NAME, MKAD_VERTICES)
    }
}
