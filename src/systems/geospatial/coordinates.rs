use cgmath::Point3;

use crate::components::geometry::Coordinate2D;

pub struct CoordinatesSystem {}

impl CoordinatesSystem {
    /// x = r cos(lat) cos(lon), y = r cos(lat) sin(lon), z = r sin(lat)
    pub fn lon_lat_to_cartesian(coordinate: &Coordinate2D, radius: f64) -> Point3<f64> {
        let lat = coordinate.lat.to_radians();
        let lon = coordinate.lon.to_radians();

        let x = radius * lat.cos() * lon.cos();
        let y = radius * lat.cos() * lon.sin();
        let z = radius * lat.sin();

        Point3::new(x, y, z)
    }

    pub fn project_all(coordinates: &[Coordinate2D], radius: f64) -> Vec<Point3<f64>> {
        coordinates
            .iter()
            .map(|c| CoordinatesSystem::lon_lat_to_cartesian(c, radius))
            .collect()
    }
}
