// src/services/templates.rs
// DOCUMENTATION: Text templates for prompts and fallback recommendations
// PURPOSE: Mood/budget keyword tables, price ranges, dish suggestions and
// the wording used when no live data is available

use crate::models::{PlaceSearchResult, QuizAnswers, UserLocation};
use crate::services::random::RandomSource;

/// Mood table: (answer text, search keyword, relevance markers)
const MOOD_PROFILES: &[(&str, &str, &[&str])] = &[
    ("행복해요", "분위기 좋은", &["행복", "분위기"]),
    ("피곤해요", "든든한 집밥", &["집밥", "든든"]),
    ("스트레스 받아요", "매운 음식", &["매운", "불"]),
    ("기분이 평범해요", "일반적인", &[]),
    ("설레요", "특별한 데이트", &["데이트", "다이닝"]),
    ("우울해요", "따뜻한 위로", &["따뜻", "국밥"]),
    ("활기차요", "에너지 충전", &["에너지", "고기"]),
    ("여유로워요", "힐링", &["힐링", "카페"]),
];

/// Dishes suggested per food type
const MENUS: &[(&str, &[&str])] = &[
    ("한식", &["김치찌개", "비빔밥", "불고기", "갈비탕", "삼겹살", "냉면"]),
    ("중식", &["짜장면", "짬뽕", "탕수육", "마파두부", "깐풍기"]),
    ("일식", &["라멘", "초밥", "돈까스", "우동", "규동"]),
    ("양식", &["스테이크", "파스타", "피자", "리조또", "그라탕"]),
    ("분식", &["떡볶이", "김밥", "라면", "순대", "튀김"]),
    ("패스트푸드", &["햄버거", "치킨", "핫도그", "감자튀김", "샌드위치"]),
    ("채식", &["샐러드", "비건버거", "두부스테이크", "퀴노아볼"]),
    ("동남아식", &["팟타이", "똠얌꿍", "그린커리", "쌀국수", "분짜"]),
    ("인도식", &["카레", "난", "비리야니", "탄두리치킨"]),
    ("멕시칸", &["타코", "부리또", "나초", "퀘사디야"]),
    ("이탈리안", &["파스타", "피자", "리조또", "라자냐", "뇨끼"]),
    ("프렌치", &["스테이크", "오니언수프", "라따뚜이", "코코뱅"]),
    ("태국식", &["팟타이", "똠얌꿍", "그린커리", "쏨땀"]),
    ("베트남식", &["쌀국수", "분짜", "반미", "월남쌈"]),
    ("아시안퓨전", &["퓨전볶음밥", "아시안샐러드", "퓨전카레", "퓨전덮밥"]),
    ("치킨", &["후라이드치킨", "양념치킨", "간장치킨", "마늘치킨"]),
    ("피자", &["페퍼로니피자", "마르게리타", "불고기피자", "고르곤졸라피자"]),
    ("버거", &["비프버거", "치킨버거", "치즈버거", "베이컨버거"]),
    ("샐러드", &["시저샐러드", "그린샐러드", "코브샐러드", "치킨샐러드"]),
    ("디저트", &["케이크", "마카롱", "티라미수", "타르트", "젤라또"]),
];

/// Price tier derived from the budget answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetTier {
    Unspecified,
    Budget,
    Standard,
    Upscale,
    Premium,
    Luxury,
}

impl BudgetTier {
    /// Classify a budget answer; higher tiers are checked first so
    /// "50000" can never fall into a cheaper tier
    pub fn from_budget(budget: &str) -> Self {
        let compact: String = budget.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
        let has = |needles: &[&str]| needles.iter().any(|n| compact.contains(n));

        if has(&["5만원", "50000"]) {
            BudgetTier::Luxury
        } else if has(&["4만원", "40000"]) {
            BudgetTier::Premium
        } else if has(&["3만원", "30000"]) {
            BudgetTier::Upscale
        } else if has(&["2만원", "20000", "1만5천", "15000"]) {
            BudgetTier::Standard
        } else if has(&["1만원", "10000"]) {
            BudgetTier::Budget
        } else {
            BudgetTier::Unspecified
        }
    }

    pub fn price_range(self) -> &'static str {
        match self {
            BudgetTier::Budget => "8,000-12,000원",
            BudgetTier::Standard => "15,000-25,000원",
            BudgetTier::Upscale => "25,000-35,000원",
            BudgetTier::Premium => "35,000-45,000원",
            BudgetTier::Luxury => "45,000-55,000원",
            BudgetTier::Unspecified => "가격 문의",
        }
    }

    pub fn search_keywords(self) -> &'static str {
        match self {
            BudgetTier::Budget => "저렴한 가성비",
            BudgetTier::Standard => "합리적인 가격",
            BudgetTier::Upscale => "적당한 가격",
            BudgetTier::Premium | BudgetTier::Luxury => "고급 맛집",
            BudgetTier::Unspecified => "",
        }
    }

    /// Name fragments that suggest a place fits this tier
    pub fn name_markers(self) -> &'static [&'static str] {
        match self {
            BudgetTier::Budget => &["분식", "기사식당", "가성비"],
            BudgetTier::Standard | BudgetTier::Upscale => &["식당", "전문점"],
            BudgetTier::Premium | BudgetTier::Luxury => &["명가", "다이닝", "레스토랑"],
            BudgetTier::Unspecified => &[],
        }
    }
}

fn mood_profile(mood: &str) -> Option<&'static (&'static str, &'static str, &'static [&'static str])> {
    MOOD_PROFILES
        .iter()
        .find(|(key, _, _)| mood.contains(key.replacen('요', "", 1).as_str()))
}

/// Search keyword for a mood answer
pub fn mood_keyword(mood: &str) -> &'static str {
    mood_profile(mood).map(|(_, keyword, _)| *keyword).unwrap_or("맛있는")
}

/// Whether a text contains a marker of the given mood
pub fn matches_mood(mood: &str, text: &str) -> bool {
    mood_profile(mood)
        .map(|(_, _, markers)| markers.iter().any(|m| text.contains(m)))
        .unwrap_or(false)
}

/// Label used in generated text when no food type was chosen
pub fn food_label(food_type: &str) -> &str {
    if food_type.trim().is_empty() {
        "음식"
    } else {
        food_type
    }
}

/// Random dish for a food type
pub fn suggest_dish(food_type: &str, rng: &impl RandomSource) -> String {
    match MENUS.iter().find(|(kind, _)| *kind == food_type) {
        Some((_, dishes)) => dishes[rng.index(dishes.len())].to_string(),
        None => "특별 메뉴".to_string(),
    }
}

/// Deterministic placeholder image for synthetic cards
pub fn placeholder_image_url(food_type: &str, slot: u32) -> String {
    let seed = food_type.chars().next().map(|c| c as u32).unwrap_or(0) * 10 + slot;
    format!("https://picsum.photos/800/600?random={}", seed)
}

/// Deterministic reason used when personalization is unavailable
pub fn templated_reason(quiz: &QuizAnswers) -> String {
    let mut reason = String::new();

    if !quiz.mood.is_empty() {
        reason.push_str(&format!("{} 기분에 어울리는 ", quiz.mood));
    }
    reason.push_str(&format!("{} 맛집이에요.", food_label(&quiz.food_type)));

    if quiz.budget.is_empty() {
        reason.push_str(" 부담 없이 들르기 좋은 곳이에요.");
    } else {
        reason.push_str(&format!(" {} 예산으로 즐기기 좋은 곳이에요.", quiz.budget));
    }

    reason
}

/// Text parts of one synthetic recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct BackupTemplate {
    pub name: String,
    pub reason: String,
    pub location: String,
}

/// Three synthetic recommendations used when every live source failed
pub fn backup_templates(quiz: &QuizAnswers, location: Option<&UserLocation>) -> Vec<BackupTemplate> {
    let food = food_label(&quiz.food_type);
    let mood = if quiz.mood.is_empty() { "지금" } else { quiz.mood.as_str() };
    let budget = if quiz.budget.is_empty() { "원하는" } else { quiz.budget.as_str() };
    let near = if location.is_some() { "현재 위치 근처에서" } else { "주변에서" };
    let address = location.and_then(|l| l.address_text()).map(str::to_string);

    vec![
        BackupTemplate {
            name: format!("AI 추천 {} 맛집", food),
            reason: format!(
                "실시간 검색이 잠시 제한되어 있지만, {} 기분에는 {}이(가) 좋은 선택이에요. {} {} 예산에 맞는 곳을 찾아보세요!",
                mood, food, near, budget
            ),
            location: address.clone().unwrap_or_else(|| "근처 맛집 직접 검색 권장".to_string()),
        },
        BackupTemplate {
            name: format!("스마트 추천 {} 전문점", food),
            reason: format!(
                "{} 상태일 때 {}을(를) 고른 분들의 만족도가 높아요. {} 마음에 드는 곳을 찾아보세요!",
                mood, food, near
            ),
            location: address.clone().unwrap_or_else(|| "지역별 맛집 탐색 추천".to_string()),
        },
        BackupTemplate {
            name: format!("개인화 {} 추천", food),
            reason: format!(
                "{} 기분과 {} 예산을 함께 고려하면 {} 전문점이 가장 만족스러운 선택이 될 거예요.",
                mood, budget, food
            ),
            location: address.unwrap_or_else(|| "주변 지역 직접 탐색".to_string()),
        },
    ]
}

/// Location phrase used in prompts
fn prompt_location(location_text: &str, location: Option<&UserLocation>) -> String {
    match location.and_then(|l| l.point()) {
        Some(p) => format!("{} (위도 {:.4}, 경도 {:.4})", location_text, p.y(), p.x()),
        None => location_text.to_string(),
    }
}

/// Prompt asking the generative backend to personalize real search results
pub fn personalize_prompt(
    quiz: &QuizAnswers,
    places: &[PlaceSearchResult],
    location_text: &str,
) -> String {
    let listing = places
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {} | {} | {}", i + 1, p.name, p.category, p.address))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "당신은 맛집 추천 전문가입니다. 사용자는 {location} 근처에 있고, 기분은 \"{mood}\", 원하는 음식은 \"{food}\", 예산은 \"{budget}\"입니다.\n\
         아래 실제 음식점 목록의 각 항목에 대해 이 사용자에게 왜 어울리는지 한두 문장으로 설명하고 추천 메뉴 하나를 골라주세요.\n\n\
         {listing}\n\n\
         다른 설명 없이 JSON 배열만 출력하세요. 형식: [{{\"name\": \"음식점 이름\", \"reason\": \"추천 이유\", \"menu\": \"추천 메뉴\"}}]",
        location = location_text,
        mood = quiz.mood,
        food = food_label(&quiz.food_type),
        budget = quiz.budget,
        listing = listing,
    )
}

/// Prompt asking the generative backend for real restaurants directly
pub fn direct_prompt(quiz: &QuizAnswers, location_text: &str, location: Option<&UserLocation>) -> String {
    let tier = BudgetTier::from_budget(&quiz.budget);

    format!(
        "당신은 한국 맛집 추천 전문가입니다. {location} 근처에서 실제로 영업 중인 {food} 음식점 3곳을 추천해주세요.\n\
         사용자의 기분: \"{mood}\" ({mood_keyword}), 예산: \"{budget}\" ({budget_keyword}).\n\
         실존하는 음식점 이름과 정확한 좌표를 사용하세요.\n\n\
         다른 설명 없이 JSON 배열만 출력하세요. 형식:\n\
         [{{\"name\": \"음식점 이름\", \"reason\": \"추천 이유\", \"location\": \"주소\", \"price\": \"가격대\", \"rating\": 4.5, \"foodType\": \"대표 메뉴\", \"phone\": \"전화번호\", \"latitude\": 37.5, \"longitude\": 127.0}}]",
        location = prompt_location(location_text, location),
        food = food_label(&quiz.food_type),
        mood = quiz.mood,
        mood_keyword = mood_keyword(&quiz.mood),
        budget = quiz.budget,
        budget_keyword = tier.search_keywords(),
    )
}
