use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kota Semarang, used whenever a region name is not in the table.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(-7.0051, 110.4381);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let (lat_a, lat_b) = (self.latitude.to_radians(), other.latitude.to_radians());
        let delta_lat = lat_b - lat_a;
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum RegionKind {
    Kabupaten,
    Kota,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub short_name: String,
    pub coordinate: Coordinate,
}

impl Region {
    pub fn new(kind: RegionKind, short_name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            kind,
            short_name: short_name.to_owned(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }

    /// Full name as shown in the selector, e.g. `Kota Semarang`.
    pub fn name(&self) -> String {
        format!("{} {}", self.kind, self.short_name)
    }
}

/// Immutable lookup from region name to coordinate.
#[derive(Clone, Debug)]
pub struct RegionTable {
    regions: HashMap<String, Region>,
    default_coordinate: Coordinate,
}

impl RegionTable {
    pub fn new(regions: impl IntoIterator<Item = Region>, default_coordinate: Coordinate) -> Self {
        let regions = regions
            .into_iter()
            .map(|region| (region.name(), region))
            .collect();
        Self {
            regions,
            default_coordinate,
        }
    }

    /// Every Kabupaten and Kota of Jawa Tengah.
    pub fn central_java() -> Self {
        use RegionKind::{Kabupaten, Kota};

        let regions = vec![
            Region::new(Kabupaten, "Banjarnegara", -7.3971, 109.6915),
            Region::new(Kabupaten, "Banyumas", -7.5031, 109.2031),
            Region::new(Kabupaten, "Batang", -7.0392, 109.8894),
            Region::new(Kabupaten, "Blora", -7.0122, 111.3799),
            Region::new(Kabupaten, "Boyolali", -7.5316, 110.5969),
            Region::new(Kabupaten, "Brebes", -6.8725, 109.0428),
            Region::new(Kabupaten, "Cilacap", -7.7257, 109.0118),
            Region::new(Kabupaten, "Demak", -6.8944, 110.6384),
            Region::new(Kabupaten, "Grobogan", -7.0135, 110.9177),
            Region::new(Kabupaten, "Jepara", -6.5827, 110.6677),
            Region::new(Kabupaten, "Karanganyar", -7.5981, 111.0453),
            Region::new(Kabupaten, "Kebumen", -7.6681, 109.6526),
            Region::new(Kabupaten, "Kendal", -7.0264, 110.1879),
            Region::new(Kabupaten, "Klaten", -7.7022, 110.6031),
            Region::new(Kabupaten, "Kudus", -6.8102, 110.8418),
            Region::new(Kabupaten, "Magelang", -7.4305, 110.2832),
            Region::new(Kabupaten, "Pati", -6.7559, 111.0389),
            Region::new(Kabupaten, "Pekalongan", -7.0317, 109.6242),
            Region::new(Kabupaten, "Pemalang", -6.8881, 109.3784),
            Region::new(Kabupaten, "Purbalingga", -7.3892, 109.3759),
            Region::new(Kabupaten, "Purworejo", -7.7132, 110.0079),
            Region::new(Kabupaten, "Rembang", -6.8082, 111.4277),
            Region::new(Kabupaten, "Semarang", -7.2001, 110.4399),
            Region::new(Kabupaten, "Sragen", -7.4278, 111.0091),
            Region::new(Kabupaten, "Sukoharjo", -7.6484, 110.8559),
            Region::new(Kabupaten, "Tegal", -6.8637, 109.1058),
            Region::new(Kabupaten, "Temanggung", -7.3156, 110.1742),
            Region::new(Kabupaten, "Wonogiri", -7.8138, 110.9231),
            Region::new(Kabupaten, "Wonosobo", -7.3632, 109.9005),
            Region::new(Kota, "Magelang", -7.4797, 110.2177),
            Region::new(Kota, "Pekalongan", -6.8898, 109.6746),
            Region::new(Kota, "Salatiga", -7.3305, 110.5084),
            Region::new(Kota, "Semarang", -7.0051, 110.4381),
            Region::new(Kota, "Surakarta", -7.5591, 110.8291),
            Region::new(Kota, "Tegal", -6.8797, 109.1256),
        ];
        Self::new(regions, DEFAULT_COORDINATE)
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Names are matched case-sensitively. Unknown names resolve to the
    /// default coordinate.
    pub fn coordinate_for(&self, name: &str) -> Coordinate {
        match self.get(name) {
            Some(region) => region.coordinate,
            None => {
                tracing::debug!(region = name, "Unknown region, using default coordinate");
                self.default_coordinate
            }
        }
    }

    pub fn regions_of_kind(&self, kind: RegionKind) -> Vec<&Region> {
        self.regions
            .values()
            .filter(|region| region.kind == kind)
            .sorted_by(|a, b| a.short_name.cmp(&b.short_name))
            .collect()
    }

    pub fn nearest(&self, position: &Coordinate) -> Option<&Region> {
        self.regions.values().min_by(|a, b| {
            a.coordinate
                .distance_km(position)
                .total_cmp(&b.coordinate.distance_km(position))
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, RegionKind, RegionTable, DEFAULT_COORDINATE};
    use rstest::rstest;

    #[rstest]
    #[case("Kabupaten Banyumas", Coordinate::new(-7.5031, 109.2031))]
    #[case("Kota Surakarta", Coordinate::new(-7.5591, 110.8291))]
    #[case("Kabupaten Magelang", Coordinate::new(-7.4305, 110.2832))]
    #[case("Kota Magelang", Coordinate::new(-7.4797, 110.2177))]
    #[case("Kabupaten Atlantis", DEFAULT_COORDINATE)]
    #[case("kota surakarta", DEFAULT_COORDINATE)]
    #[case("", DEFAULT_COORDINATE)]
    fn test_coordinate_lookup_is_total(#[case] region: &str, #[case] expected: Coordinate) {
        let table = RegionTable::central_java();
        assert_eq!(table.coordinate_for(region), expected);
    }

    #[test]
    fn test_catalogue_contains_every_regency_and_city() {
        let table = RegionTable::central_java();
        assert_eq!(table.len(), 35);
        assert_eq!(table.regions_of_kind(RegionKind::Kabupaten).len(), 29);
        assert_eq!(table.regions_of_kind(RegionKind::Kota).len(), 6);
    }

    #[test]
    fn test_regions_of_a_kind_are_sorted_by_name() {
        let table = RegionTable::central_java();
        let names = table
            .regions_of_kind(RegionKind::Kota)
            .into_iter()
            .map(|region| region.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "Kota Magelang",
                "Kota Pekalongan",
                "Kota Salatiga",
                "Kota Semarang",
                "Kota Surakarta",
                "Kota Tegal",
            ]
        );
    }

    #[rstest]
    #[case(Coordinate::new(-7.56, 110.83), "Kota Surakarta")]
    #[case(Coordinate::new(-6.59, 110.66), "Kabupaten Jepara")]
    #[case(Coordinate::new(-7.73, 109.02), "Kabupaten Cilacap")]
    fn test_nearest_region(#[case] position: Coordinate, #[case] expected: &str) {
        let table = RegionTable::central_java();
        let nearest = table.nearest(&position).unwrap();
        assert_eq!(nearest.name(), expected);
    }

    #[test]
    fn test_distance_between_semarang_and_surakarta() {
        let semarang = Coordinate::new(-7.0051, 110.4381);
        let surakarta = Coordinate::new(-7.5591, 110.8291);
        let distance = semarang.distance_km(&surakarta);
        assert!((70.0..80.0).contains(&distance), "{distance}");
    }
}
