use crate::aspects::{AspectCalculator, AspectPair, OrbSettings};
use crate::body::Body;
use crate::boundaries::{zodiac_signs, Cusp, HouseCusps};
use crate::coordinate::Coordinate;
use crate::ephemeris::{GeoLocation, HouseSystem, HouseSystemProvider, PositionProvider};
use crate::search::{
    ensure_concrete, find_next_aspect, find_next_ingress, transiting_coordinates, Ingress,
    NextAspect, SearchConfig, SearchError, TransitWindow,
};
use chrono::{DateTime, Utc};

/// A natal snapshot plus the searches that run against it.
///
/// Natal positions are queried once at construction; transit searches
/// query the same provider for the moving body.
pub struct BirthChart<'p, P: ?Sized> {
    provider: &'p P,
    instant: DateTime<Utc>,
    coordinates: Vec<Coordinate>,
    houses: Option<HouseCusps>,
    search: SearchConfig,
}

impl<'p, P: PositionProvider + ?Sized> BirthChart<'p, P> {
    pub fn new(
        provider: &'p P,
        instant: DateTime<Utc>,
        bodies: &[Body],
        search: SearchConfig,
    ) -> Result<Self, SearchError> {
        search.validate().map_err(SearchError::InvalidConfig)?;
        let mut coordinates = Vec::with_capacity(bodies.len());
        for body in bodies {
            let body = ensure_concrete(*body)?;
            if coordinates.iter().any(|c: &Coordinate| c.body == body) {
                continue;
            }
            coordinates.push(Coordinate::query(provider, body, instant)?);
        }
        log::debug!("birth chart at {} with {} bodies", instant, coordinates.len());

        Ok(Self {
            provider,
            instant,
            coordinates,
            houses: None,
            search,
        })
    }

    /// Attach house cusps for the birth place
    pub fn with_houses<H: HouseSystemProvider + ?Sized>(
        mut self,
        houses_provider: &H,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Self, SearchError> {
        self.houses = Some(HouseCusps::new(houses_provider, self.instant, location, system)?);
        Ok(self)
    }

    /// Attach house cusps in the provider's default house system, which for
    /// the Swiss adapter is the one named in its config
    pub fn with_default_houses<H: HouseSystemProvider + ?Sized>(
        self,
        houses_provider: &H,
        location: GeoLocation,
    ) -> Result<Self, SearchError> {
        let system = houses_provider.default_system();
        self.with_houses(houses_provider, location, system)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn coordinate(&self, body: Body) -> Option<&Coordinate> {
        self.coordinates.iter().find(|c| c.body == body)
    }

    pub fn houses(&self) -> Option<&HouseCusps> {
        self.houses.as_ref()
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// House containing a natal body
    pub fn house_of(&self, body: Body) -> Option<&Cusp> {
        let coordinate = self.coordinate(body)?;
        self.houses.as_ref()?.cusp_for_longitude(coordinate.longitude())
    }

    /// Aspects among the natal bodies
    pub fn aspects(&self, orbs: &OrbSettings) -> Vec<AspectPair> {
        AspectCalculator::new(orbs.clone()).compute_intra_aspects(&self.coordinates)
    }

    /// Aspects from the sky at `instant` to the natal bodies
    pub fn transit_aspects(
        &self,
        instant: DateTime<Utc>,
        orbs: &OrbSettings,
    ) -> Result<Vec<AspectPair>, SearchError> {
        let transits = self
            .coordinates
            .iter()
            .map(|natal| Coordinate::query(self.provider, natal.body, instant))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AspectCalculator::new(orbs.clone()).compute_inter_aspects(&transits, &self.coordinates))
    }

    fn natal(&self, body: Body) -> Result<&Coordinate, SearchError> {
        ensure_concrete(body)?;
        self.coordinate(body).ok_or(SearchError::BodyNotInChart(body))
    }

    /// Next day on which transiting `body` aspects natal `natal_body`
    pub fn find_next_aspect(
        &self,
        body: Body,
        natal_body: Body,
        seed: DateTime<Utc>,
        orb: f64,
    ) -> Result<NextAspect, SearchError> {
        let natal = self.natal(natal_body)?;
        find_next_aspect(self.provider, body, natal, seed, orb, &self.search)
    }

    /// Window of the transit of `body` to natal `natal_body` active at `seed`
    pub fn transiting_coordinates(
        &self,
        body: Body,
        natal_body: Body,
        seed: DateTime<Utc>,
        orb: f64,
    ) -> Result<Option<TransitWindow>, SearchError> {
        let natal = self.natal(natal_body)?;
        transiting_coordinates(self.provider, body, natal, seed, orb, &self.search)
    }

    /// Window of the transit of `body` to natal house cusp `house`
    pub fn transiting_cusp(
        &self,
        body: Body,
        house: u8,
        seed: DateTime<Utc>,
        orb: f64,
    ) -> Result<Option<TransitWindow>, SearchError> {
        let houses = self.houses.as_ref().ok_or(SearchError::MissingHouses)?;
        let cusp = houses
            .cusp(house)
            .ok_or(SearchError::InvalidConfig("house number must be 1..=12"))?;
        transiting_coordinates(self.provider, body, cusp, seed, orb, &self.search)
    }

    /// Next time transiting `body` changes natal house
    pub fn next_house_ingress(&self, body: Body, seed: DateTime<Utc>) -> Result<Ingress, SearchError> {
        let houses = self.houses.as_ref().ok_or(SearchError::MissingHouses)?;
        find_next_ingress(self.provider, body, houses.cusps(), seed, &self.search)
    }

    /// Next time transiting `body` changes sign
    pub fn next_sign_ingress(&self, body: Body, seed: DateTime<Utc>) -> Result<Ingress, SearchError> {
        find_next_ingress(self.provider, body, zodiac_signs(), seed, &self.search)
    }
}
