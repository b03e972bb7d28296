//! GPS coordinate source
//!
//! Coordinates are read once at boot to centre the map pages.

/// Latitude/longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coords {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: wrap_longitude(longitude),
        }
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// GPS collaborator
pub trait GpsSource {
    /// Blocking position fix
    fn get_coords(&mut self) -> Coords;
}

/// Fixed position from configuration (no receiver attached)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Coords);

impl GpsSource for FixedPosition {
    fn get_coords(&mut self) -> Coords {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_position() {
        let mut gps = FixedPosition(Coords::new(51.5, -0.12));
        assert_eq!(gps.get_coords(), Coords::new(51.5, -0.12));
    }

    #[test]
    fn test_coords_normalized() {
        let c = Coords::new(95.0, 190.0);
        assert_eq!(c.latitude, 90.0);
        assert!((c.longitude - -170.0).abs() < 1e-9);
        assert_eq!(Coords::new(0.0, 180.0).longitude, 180.0);
        assert_eq!(Coords::new(0.0, -180.0).longitude, -180.0);
    }
}
