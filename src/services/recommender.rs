// src/services/recommender.rs
// DOCUMENTATION: Recommendation orchestrator
// PURPOSE: Search, enrich, personalize and rank restaurants for one quiz run,
// degrading to synthetic results instead of failing

use crate::models::{
    is_usable_image_url, Answer, DistanceSource, FoodRecommendation, PlaceSearchResult,
    QuizAnswers, UserLocation,
};
use crate::services::ai_parse::{parse_ai_array, AiParse, AiRestaurant, PersonalizedReason};
use crate::services::geo::{destination_point, format_distance, haversine_km};
use crate::services::providers::{PlaceSearch, TextGenerator};
use crate::services::random::RandomSource;
use crate::services::templates::{
    backup_templates, direct_prompt, food_label, matches_mood, personalize_prompt,
    placeholder_image_url, suggest_dish, templated_reason, BudgetTier,
};
use futures::future::join_all;
use geo_types::Point;
use serde_json::Value;
use std::collections::HashSet;

/// Cards returned per request
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Location phrase used when the caller gave no location at all
pub const DEFAULT_SEARCH_AREA: &str = "서울시";

/// Placeholder distance range (km) when nothing can be measured
const ESTIMATED_DISTANCE_KM: (f64, f64) = (0.1, 2.5);

/// Synthetic placement range (km) around the caller
const SYNTHETIC_PLACEMENT_KM: (f64, f64) = (0.5, 3.0);

/// Placeholder rating range
const ESTIMATED_RATING: (f64, f64) = (4.0, 4.9);

/// Recommendation service
/// DOCUMENTATION: Generic over the search and personalize capabilities and the
/// random source; the concrete providers are picked once at startup
pub struct RecommendationService<S, G, R> {
    search: S,
    generator: G,
    rng: R,
}

impl<S, G, R> RecommendationService<S, G, R>
where
    S: PlaceSearch,
    G: TextGenerator,
    R: RandomSource,
{
    pub fn new(search: S, generator: G, rng: R) -> Self {
        Self {
            search,
            generator,
            rng,
        }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Generate up to three recommendations
    /// DOCUMENTATION: Never fails; every provider error is logged and replaced
    /// by the next fallback stage
    pub async fn generate_recommendations(
        &self,
        answers: &[Answer],
        location: Option<&UserLocation>,
    ) -> Vec<FoodRecommendation> {
        let quiz = QuizAnswers::from_answers(answers);
        let user_point = location.and_then(UserLocation::point);
        let location_text = self.resolve_location_text(location).await;

        log::info!(
            "Generating recommendations: mood='{}', food='{}', budget='{}', near='{}'",
            quiz.mood,
            quiz.food_type,
            quiz.budget,
            location_text
        );

        let query = format!("{} 맛집", food_label(&quiz.food_type));
        let candidates = match self
            .search
            .search_places(&query, Some(&location_text), user_point)
            .await
        {
            Ok(places) if !places.is_empty() => {
                log::info!("Real search returned {} places", places.len());
                self.from_search_results(&quiz, places, &location_text, user_point)
                    .await
            }
            Ok(_) => {
                log::info!("Real search returned nothing, asking the generative backend");
                self.from_generator(&quiz, &location_text, location).await
            }
            Err(e) => {
                log::warn!("Real search failed ({}), asking the generative backend", e);
                self.from_generator(&quiz, &location_text, location).await
            }
        };

        let recommendations = self.finalize(candidates, &quiz, user_point.is_some());
        if recommendations.is_empty() {
            log::warn!("Every stage came back empty, using synthetic recommendations");
            return self.finalize(
                self.backup_recommendations(&quiz, location),
                &quiz,
                user_point.is_some(),
            );
        }

        log::info!("Returning {} recommendations", recommendations.len());
        recommendations
    }

    /// Address, reverse-geocoded coordinates, or the default area
    async fn resolve_location_text(&self, location: Option<&UserLocation>) -> String {
        let Some(location) = location else {
            return DEFAULT_SEARCH_AREA.to_string();
        };

        if let Some(address) = location.address_text() {
            return address.to_string();
        }

        match location.point() {
            Some(point) => self.search.reverse_geocode(point.y(), point.x()).await,
            None => DEFAULT_SEARCH_AREA.to_string(),
        }
    }

    /// Second photo lookup (name + address) for places the search left
    /// without one; places that have a photo cost no request
    async fn enrich_photos(&self, places: &[PlaceSearchResult]) -> Vec<Option<String>> {
        let lookups = places.iter().map(|place| async move {
            if let Some(url) = place.primary_photo_url() {
                return Some(url.to_string());
            }
            if place.address.trim().is_empty() {
                return None;
            }
            self.search.find_photo_near(&place.name, &place.address).await
        });

        join_all(lookups).await
    }

    /// Personalized reasons, or nothing when the backend is unusable
    async fn personalize(
        &self,
        quiz: &QuizAnswers,
        places: &[PlaceSearchResult],
        location_text: &str,
    ) -> Vec<PersonalizedReason> {
        let prompt = personalize_prompt(quiz, places, location_text);

        let parsed = match self.generator.generate(&prompt).await {
            Ok(text) => parse_ai_array::<PersonalizedReason>(&text),
            Err(e) => AiParse::ParseFailure(e.to_string()),
        };

        match parsed {
            AiParse::Parsed(reasons) => {
                log::info!("Personalized {} of {} places", reasons.len(), places.len());
                reasons
            }
            AiParse::ParseFailure(reason) => {
                log::warn!("Personalization unavailable ({}), using templated reasons", reason);
                Vec::new()
            }
        }
    }

    async fn from_search_results(
        &self,
        quiz: &QuizAnswers,
        places: Vec<PlaceSearchResult>,
        location_text: &str,
        user_point: Option<Point<f64>>,
    ) -> Vec<FoodRecommendation> {
        let (photos, reasons) = futures::join!(
            self.enrich_photos(&places),
            self.personalize(quiz, &places, location_text)
        );
        let price = BudgetTier::from_budget(&quiz.budget).price_range();

        places
            .into_iter()
            .zip(photos)
            .map(|(place, photo)| {
                let personalized = find_personalized(&reasons, &place.name);

                let mut rec = FoodRecommendation::new(
                    &place.name,
                    &personalized
                        .map(|p| p.reason.clone())
                        .unwrap_or_else(|| templated_reason(quiz)),
                );
                rec.location = (!place.address.is_empty()).then(|| place.address.clone());
                rec.price = Some(price.to_string());
                rec.rating = Some(match place.rating {
                    Some(rating) => format_rating(f64::from(rating)),
                    None => self.estimated_rating(),
                });
                self.set_distance(&mut rec, user_point, place.point());
                rec.image_url = photo.filter(|url| is_usable_image_url(url));
                rec.food_type = Some(
                    personalized
                        .and_then(|p| p.menu.clone())
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| suggest_dish(&quiz.food_type, &self.rng)),
                );
                rec.phone = place.phone;
                rec.website = place.website;
                rec.latitude = place.latitude;
                rec.longitude = place.longitude;
                rec
            })
            .collect()
    }

    /// Ask the generative backend for restaurants directly, then templates
    async fn from_generator(
        &self,
        quiz: &QuizAnswers,
        location_text: &str,
        location: Option<&UserLocation>,
    ) -> Vec<FoodRecommendation> {
        let prompt = direct_prompt(quiz, location_text, location);

        let parsed = match self.generator.generate(&prompt).await {
            Ok(text) => parse_ai_array::<AiRestaurant>(&text),
            Err(e) => AiParse::ParseFailure(e.to_string()),
        };

        match parsed {
            AiParse::Parsed(restaurants) => {
                log::info!("Generative backend proposed {} restaurants", restaurants.len());
                let user_point = location.and_then(UserLocation::point);
                restaurants
                    .into_iter()
                    .enumerate()
                    .map(|(slot, r)| self.from_ai_restaurant(quiz, r, slot as u32, user_point))
                    .collect()
            }
            AiParse::ParseFailure(reason) => {
                log::warn!(
                    "Generative backend unusable ({}), using synthetic recommendations",
                    reason
                );
                self.backup_recommendations(quiz, location)
            }
        }
    }

    fn from_ai_restaurant(
        &self,
        quiz: &QuizAnswers,
        restaurant: AiRestaurant,
        slot: u32,
        user_point: Option<Point<f64>>,
    ) -> FoodRecommendation {
        let mut rec = FoodRecommendation::new(&restaurant.name, &restaurant.reason);
        let place_point = match (restaurant.latitude, restaurant.longitude) {
            (Some(lat), Some(lng)) => Some(Point::new(lng, lat)),
            _ => None,
        };

        rec.location = restaurant.location.filter(|l| !l.trim().is_empty());
        rec.price = Some(
            restaurant
                .price
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| BudgetTier::from_budget(&quiz.budget).price_range().to_string()),
        );
        rec.rating = Some(
            restaurant
                .rating
                .as_ref()
                .and_then(rating_from_value)
                .unwrap_or_else(|| self.estimated_rating()),
        );
        self.set_distance(&mut rec, user_point, place_point);
        rec.image_url = Some(
            restaurant
                .image_url
                .filter(|url| is_usable_image_url(url))
                .unwrap_or_else(|| placeholder_image_url(&quiz.food_type, slot)),
        );
        rec.food_type = Some(
            restaurant
                .food_type
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| suggest_dish(&quiz.food_type, &self.rng)),
        );
        rec.phone = restaurant.phone.filter(|p| !p.trim().is_empty());
        rec.website = restaurant.website.filter(|w| !w.trim().is_empty());
        rec.latitude = restaurant.latitude;
        rec.longitude = restaurant.longitude;
        rec
    }

    /// Three fully synthetic cards, placed around the caller when possible
    fn backup_recommendations(
        &self,
        quiz: &QuizAnswers,
        location: Option<&UserLocation>,
    ) -> Vec<FoodRecommendation> {
        let origin = location.and_then(UserLocation::point);
        let price = BudgetTier::from_budget(&quiz.budget).price_range();

        backup_templates(quiz, location)
            .into_iter()
            .enumerate()
            .map(|(slot, template)| {
                let mut rec = FoodRecommendation::new(&template.name, &template.reason);
                rec.location = Some(template.location);
                rec.price = Some(price.to_string());
                rec.rating = Some(self.estimated_rating());

                let km = match origin {
                    Some(origin) => {
                        let km = self.rng.range(SYNTHETIC_PLACEMENT_KM.0, SYNTHETIC_PLACEMENT_KM.1);
                        let placed = destination_point(origin, km, self.rng.range(0.0, 360.0));
                        rec.latitude = Some(placed.y());
                        rec.longitude = Some(placed.x());
                        km
                    }
                    None => self.rng.range(ESTIMATED_DISTANCE_KM.0, ESTIMATED_DISTANCE_KM.1),
                };
                rec.distance = Some(format_distance(km));
                rec.distance_source = Some(DistanceSource::Estimated);

                rec.image_url = Some(placeholder_image_url(&quiz.food_type, slot as u32));
                rec.food_type = Some(suggest_dish(&quiz.food_type, &self.rng));
                rec
            })
            .collect()
    }

    /// Haversine when both points are known, otherwise a placeholder
    fn set_distance(
        &self,
        rec: &mut FoodRecommendation,
        user_point: Option<Point<f64>>,
        place_point: Option<Point<f64>>,
    ) {
        let (km, source) = match (user_point, place_point) {
            (Some(from), Some(to)) => (haversine_km(from, to), DistanceSource::Measured),
            _ => (
                self.rng.range(ESTIMATED_DISTANCE_KM.0, ESTIMATED_DISTANCE_KM.1),
                DistanceSource::Estimated,
            ),
        };
        rec.distance = Some(format_distance(km));
        rec.distance_source = Some(source);
    }

    fn estimated_rating(&self) -> String {
        format_rating(self.rng.range(ESTIMATED_RATING.0, ESTIMATED_RATING.1))
    }

    /// Relevance: jitter plus mood, budget and proximity bonuses
    fn relevance_score(
        &self,
        rec: &FoodRecommendation,
        quiz: &QuizAnswers,
        location_known: bool,
    ) -> f64 {
        let mut score = self.rng.next_f64() * 10.0;

        let text = format!("{} {}", rec.name, rec.reason);
        if matches_mood(&quiz.mood, &text) {
            score += 5.0;
        }

        let markers = BudgetTier::from_budget(&quiz.budget).name_markers();
        if markers.iter().any(|m| rec.name.contains(m)) {
            score += 3.0;
        }

        if location_known {
            if let Some(km) = rec.distance_km() {
                score += (2.0 - km) * 2.0;
            }
        }

        score
    }

    /// Deduplicate by case-insensitive name, rank, keep the top three
    fn finalize(
        &self,
        candidates: Vec<FoodRecommendation>,
        quiz: &QuizAnswers,
        location_known: bool,
    ) -> Vec<FoodRecommendation> {
        let mut seen = HashSet::new();

        let mut scored: Vec<(f64, FoodRecommendation)> = candidates
            .into_iter()
            .filter(|rec| !rec.name.trim().is_empty())
            .filter(|rec| seen.insert(rec.name.trim().to_lowercase()))
            .map(|mut rec| {
                if rec.reason.trim().is_empty() {
                    rec.reason = templated_reason(quiz);
                }
                (self.relevance_score(&rec, quiz, location_known), rec)
            })
            .collect();

        // scores are drawn once per item, so this is a consistent order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(MAX_RECOMMENDATIONS);
        scored.into_iter().map(|(_, rec)| rec).collect()
    }
}

fn format_rating(rating: f64) -> String {
    format!("{:.1}/5.0", rating.clamp(0.0, 5.0))
}

/// Rating from a generated item: a number or a non-empty string
fn rating_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(format_rating),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Personalized entry for a place: exact (case-insensitive) name match
/// first, then containment either way
fn find_personalized<'a>(
    reasons: &'a [PersonalizedReason],
    name: &str,
) -> Option<&'a PersonalizedReason> {
    let name = name.to_lowercase();

    reasons
        .iter()
        .find(|r| r.name.to_lowercase() == name)
        .or_else(|| {
            reasons.iter().find(|r| {
                let candidate = r.name.to_lowercase();
                candidate.contains(&name) || name.contains(&candidate)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LunchError;
    use crate::models::{PlacePhoto, QuestionId};
    use crate::services::random::testing::FixedRandom;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSearch {
        places: Result<Vec<PlaceSearchResult>, ()>,
        photo: Option<String>,
        address: String,
        photo_lookups: AtomicUsize,
    }

    impl FakeSearch {
        fn with_places(places: Vec<PlaceSearchResult>) -> Self {
            Self {
                places: Ok(places),
                photo: None,
                address: "서울특별시 중구 세종대로 110".to_string(),
                photo_lookups: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                places: Err(()),
                photo: None,
                address: "서울시 중구".to_string(),
                photo_lookups: AtomicUsize::new(0),
            }
        }
    }

    impl PlaceSearch for FakeSearch {
        async fn search_places(
            &self,
            _query: &str,
            _location_hint: Option<&str>,
            _near: Option<Point<f64>>,
        ) -> Result<Vec<PlaceSearchResult>, LunchError> {
            self.places
                .clone()
                .map_err(|_| LunchError::unreachable("naver local search", "connection refused"))
        }

        async fn find_photo_near(&self, _name: &str, _address: &str) -> Option<String> {
            self.photo_lookups.fetch_add(1, Ordering::SeqCst);
            self.photo.clone()
        }

        async fn reverse_geocode(&self, _latitude: f64, _longitude: f64) -> String {
            self.address.clone()
        }
    }

    struct FakeGenerator(Option<String>);

    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LunchError> {
            self.0
                .clone()
                .ok_or_else(|| LunchError::NotConfigured("generative AI".to_string()))
        }
    }

    fn place(name: &str, coords: Option<(f64, f64)>) -> PlaceSearchResult {
        PlaceSearchResult {
            id: name.to_string(),
            name: name.to_string(),
            address: "서울특별시 중구 세종대로".to_string(),
            phone: None,
            rating: None,
            photos: Vec::new(),
            category: "한식".to_string(),
            website: None,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
        }
    }

    fn answers() -> Vec<Answer> {
        vec![
            Answer::new(QuestionId::Mood, "행복해요"),
            Answer::new(QuestionId::FoodType, "한식"),
            Answer::new(QuestionId::Budget, "2만원"),
        ]
    }

    fn city_hall() -> UserLocation {
        UserLocation::from_coordinates(37.5665, 126.9780)
    }

    fn is_distance_badge(text: &str) -> bool {
        text.strip_suffix("km")
            .map(|n| !n.is_empty() && n.parse::<f64>().is_ok())
            .unwrap_or(false)
    }

    fn assert_well_formed(recs: &[FoodRecommendation]) {
        assert!(!recs.is_empty() && recs.len() <= MAX_RECOMMENDATIONS);
        for rec in recs {
            assert!(!rec.name.trim().is_empty());
            assert!(!rec.reason.trim().is_empty());
            assert!(rec.rating.is_some());
            let badge = rec.distance.as_deref().unwrap_or("");
            assert!(is_distance_badge(badge), "{:?}", rec.distance);
        }
    }

    #[actix_web::test]
    async fn test_search_results_become_recommendations() {
        let service = RecommendationService::new(
            FakeSearch::with_places(vec![
                place("을지면옥", Some((37.5663, 126.9918))),
                place("우래옥", None),
                place("하동관", None),
                place("명동교자", None),
            ]),
            FakeGenerator(None),
            FixedRandom(0.5),
        );

        let recs = service
            .generate_recommendations(&answers(), Some(&city_hall()))
            .await;

        assert_eq!(recs.len(), 3);
        assert_well_formed(&recs);
        assert!(recs.iter().all(|r| r.price.as_deref() == Some("15,000-25,000원")));
        assert!(recs.iter().all(|r| r.reason.contains("한식")));
    }

    #[actix_web::test]
    async fn test_measured_distance_differs_from_placeholder() {
        let service = RecommendationService::new(
            FakeSearch::with_places(vec![
                place("측정 식당", Some((37.5700, 126.9830))),
                place("추정 식당", None),
            ]),
            FakeGenerator(None),
            FixedRandom(0.5),
        );

        let recs = service
            .generate_recommendations(&answers(), Some(&city_hall()))
            .await;

        let measured = recs.iter().find(|r| r.name == "측정 식당").unwrap();
        assert_eq!(measured.distance.as_deref(), Some("0.6km"));
        assert_eq!(measured.distance_source, Some(DistanceSource::Measured));

        // FixedRandom(0.5) puts the placeholder at 0.1 + 2.4 * 0.5 = 1.3km
        let estimated = recs.iter().find(|r| r.name == "추정 식당").unwrap();
        assert_eq!(estimated.distance.as_deref(), Some("1.3km"));
        assert_eq!(estimated.distance_source, Some(DistanceSource::Estimated));
    }

    #[actix_web::test]
    async fn test_case_insensitive_duplicates_collapse() {
        let service = RecommendationService::new(
            FakeSearch::with_places(vec![
                place("Burger House", None),
                place("BURGER HOUSE", None),
                place("burger house", None),
            ]),
            FakeGenerator(None),
            FixedRandom(0.5),
        );

        let recs = service.generate_recommendations(&answers(), None).await;
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Burger House");
    }

    #[actix_web::test]
    async fn test_personalized_reasons_and_photo_retry() {
        let mut search =
            FakeSearch::with_places(vec![place("을지면옥", None), place("우래옥", None)]);
        search.photo = Some("https://img.example.com/a.jpg".to_string());
        let generator = FakeGenerator(Some(
            "결과:\n[{\"name\": \"을지면옥 본점\", \"reason\": \"시원한 평양냉면\", \"menu\": \"물냉면\"}]".to_string(),
        ));

        let service = RecommendationService::new(search, generator, FixedRandom(0.5));
        let recs = service.generate_recommendations(&answers(), None).await;

        let first = recs.iter().find(|r| r.name == "을지면옥").unwrap();
        assert_eq!(first.reason, "시원한 평양냉면");
        assert_eq!(first.food_type.as_deref(), Some("물냉면"));
        assert_eq!(first.image_url.as_deref(), Some("https://img.example.com/a.jpg"));

        let second = recs.iter().find(|r| r.name == "우래옥").unwrap();
        assert!(second.reason.contains("행복해요"));
    }

    #[actix_web::test]
    async fn test_existing_photo_is_kept() {
        let mut with_photo = place("사진 있는 집", None);
        with_photo
            .photos
            .push(PlacePhoto::from_image_search("https://img.example.com/own.jpg"));

        let mut search = FakeSearch::with_places(vec![with_photo]);
        search.photo = Some("https://img.example.com/other.jpg".to_string());

        let service = RecommendationService::new(search, FakeGenerator(None), FixedRandom(0.5));
        let recs = service.generate_recommendations(&answers(), None).await;
        assert_eq!(recs[0].image_url.as_deref(), Some("https://img.example.com/own.jpg"));
        assert_eq!(service.search().photo_lookups.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_one_address_lookup_per_place_without_photo() {
        let mut with_photo = place("사진 있는 집", None);
        with_photo
            .photos
            .push(PlacePhoto::from_image_search("https://img.example.com/own.jpg"));
        let mut no_address = place("주소 없는 집", None);
        no_address.address = String::new();

        let search = FakeSearch::with_places(vec![
            with_photo,
            place("사진 없는 집", None),
            place("또 사진 없는 집", None),
            no_address,
        ]);
        let service = RecommendationService::new(search, FakeGenerator(None), FixedRandom(0.5));
        service.generate_recommendations(&answers(), None).await;

        assert_eq!(service.search().photo_lookups.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_generator_used_when_search_fails() {
        let generator = FakeGenerator(Some(
            r#"[{"name": "을지면옥", "reason": "평양냉면 명가", "rating": 4.6,
                 "latitude": 37.5663, "longitude": 126.9918, "foodType": "물냉면"},
                {"name": "", "reason": "버려짐"}]"#
                .to_string(),
        ));
        let service =
            RecommendationService::new(FakeSearch::failing(), generator, FixedRandom(0.5));

        let recs = service
            .generate_recommendations(&answers(), Some(&city_hall()))
            .await;

        assert_eq!(recs.len(), 1);
        assert_well_formed(&recs);
        assert_eq!(recs[0].rating.as_deref(), Some("4.6/5.0"));
        assert_eq!(recs[0].distance_source, Some(DistanceSource::Measured));
        assert!(recs[0].image_url.as_deref().unwrap_or("").starts_with("https://picsum.photos/"));
    }

    #[actix_web::test]
    async fn test_synthetic_fallback_when_everything_fails() {
        let service = RecommendationService::new(
            FakeSearch::failing(),
            FakeGenerator(Some("죄송합니다, 추천할 수 없어요.".to_string())),
            FixedRandom(0.4),
        );

        let recs = service
            .generate_recommendations(&answers(), Some(&city_hall()))
            .await;

        assert_eq!(recs.len(), 3);
        assert_well_formed(&recs);
        for rec in &recs {
            assert_eq!(rec.distance_source, Some(DistanceSource::Estimated));
            // 0.5 + 2.5 * 0.4
            assert_eq!(rec.distance.as_deref(), Some("1.5km"));
            let placed = Point::new(rec.longitude.unwrap(), rec.latitude.unwrap());
            let km = haversine_km(city_hall().point().unwrap(), placed);
            assert!((km - 1.5).abs() < 0.01, "placed {}km away", km);
        }
        assert!(recs.iter().any(|r| r.name == "AI 추천 한식 맛집"));
    }

    #[actix_web::test]
    async fn test_partial_answers_and_no_location() {
        let service = RecommendationService::new(
            FakeSearch::with_places(Vec::new()),
            FakeGenerator(None),
            FixedRandom(0.2),
        );

        let recs = service.generate_recommendations(&[], None).await;
        assert_eq!(recs.len(), 3);
        assert_well_formed(&recs);
        assert!(recs.iter().all(|r| r.latitude.is_none()));
        assert!(recs.iter().any(|r| r.name == "AI 추천 음식 맛집"));
    }

    #[actix_web::test]
    async fn test_manual_location_uses_address_without_coordinates() {
        let manual =
            UserLocation::from_coordinates(0.0, 0.0).with_address("서울 마포구 합정동");
        let service = RecommendationService::new(
            FakeSearch::failing(),
            FakeGenerator(None),
            FixedRandom(0.5),
        );

        let recs = service.generate_recommendations(&answers(), Some(&manual)).await;
        assert_well_formed(&recs);
        assert!(recs.iter().all(|r| r.latitude.is_none()));
        assert!(recs.iter().all(|r| r.location.as_deref() == Some("서울 마포구 합정동")));
    }

    #[test]
    fn test_relevance_prefers_mood_and_proximity() {
        let service = RecommendationService::new(
            FakeSearch::with_places(Vec::new()),
            FakeGenerator(None),
            FixedRandom(0.5),
        );
        let quiz = QuizAnswers::from_answers(&answers());

        let mut far = FoodRecommendation::new("먼 집", "그냥 식당");
        far.distance = Some("2.4km".to_string());
        let mut near = FoodRecommendation::new("가까운 집", "그냥 식당");
        near.distance = Some("0.3km".to_string());

        let ranked = service.finalize(vec![far, near], &quiz, true);
        assert_eq!(ranked[0].name, "가까운 집");
    }

    #[test]
    fn test_rating_from_value() {
        assert_eq!(rating_from_value(&serde_json::json!(4.6)).as_deref(), Some("4.6/5.0"));
        assert_eq!(rating_from_value(&serde_json::json!("4.5/5.0")).as_deref(), Some("4.5/5.0"));
        assert_eq!(rating_from_value(&serde_json::json!(null)), None);
    }
}
