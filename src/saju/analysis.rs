//! 사주 분석: 오행 분포, 십신, 십이운성
//!
//! 모든 분류는 기호표 번호 위의 나머지 연산이며, 일간(日干)을 기준으로 한다.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::civil::CivilTime;

use super::fortune::{self, Gender, GreatFortune};
use super::symbols::{Branch, Element, Stem, TenGod, TwelveStage};
use super::{ConversionResult, Pillar, derive_hour_pillar};

/// 네 기둥의 자리
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarKey {
    Year,
    Month,
    Day,
    Hour,
}

/// 연·월·일·시 네 기둥
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    /// 변환 결과의 세 기둥에 시주를 붙인다.
    pub fn with_hour(conversion: &ConversionResult, hour: Pillar) -> Self {
        let p = &conversion.pillars;
        Self {
            year: p.year,
            month: p.month,
            day: p.day,
            hour,
        }
    }
    /// 자리와 기둥을 연·월·일·시 순으로 돌려준다.
    pub fn entries(&self) -> [(PillarKey, Pillar); 4] {
        [
            (PillarKey::Year, self.year),
            (PillarKey::Month, self.month),
            (PillarKey::Day, self.day),
            (PillarKey::Hour, self.hour),
        ]
    }
}

/// 오행별 개수. 네 기둥의 천간·지지 여덟 글자를 세므로 합은 언제나 8이다.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize)]
pub struct FiveElements {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
}

impl FiveElements {
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }
    fn bump(&mut self, element: Element) {
        let slot = match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += 1;
    }
    pub fn total(&self) -> u32 {
        Element::ALL.iter().map(|&e| self.get(e)).sum()
    }
}

/// 네 기둥의 천간과 지지 오행을 센다.
pub fn classify_five_elements(pillars: &FourPillars) -> FiveElements {
    let mut counts = FiveElements::default();
    for (_, pillar) in pillars.entries() {
        let (stem, branch) = pillar.elements();
        counts.bump(stem);
        counts.bump(branch);
    }
    counts
}

/// 일간 `day`에 대한 천간 `target`의 십신
///
/// 같은 천간이면 비견이다. 그 밖에는 상생 순서(목→화→토→금→수)에서 일간 오행으로부터
/// 몇 칸 떨어졌는지로 관계를 정한다: 1 식상, 2 재성, 3 관성, 4 인성. 음양이 같으면
/// 앞쪽(식신·편재·편관·편인), 다르면 뒤쪽이다. 오행만 같고 천간이 다르면(갑·을 등)
/// [`TenGod::Undetermined`]를 돌려준다.
///
/// # 예시
///
/// ```
/// use manse::saju::{Stem, TenGod, classify_ten_god};
///
/// assert_eq!(TenGod::Pyeonjae, classify_ten_god(Stem::Mu, Stem::Im));
/// assert_eq!(TenGod::Jeongjae, classify_ten_god(Stem::Mu, Stem::Gye));
/// assert_eq!(TenGod::Bigyeon, classify_ten_god(Stem::Mu, Stem::Mu));
/// assert_eq!(TenGod::Undetermined, classify_ten_god(Stem::Mu, Stem::Gi));
/// ```
pub fn classify_ten_god(day: Stem, target: Stem) -> TenGod {
    use TenGod::*;
    let same = day.polarity() == target.polarity();
    let pick = |yang, yin| if same { yang } else { yin };
    if day == target {
        return pick(Bigyeon, Geopjae);
    }
    let diff = (target.element().index() as i64 - day.element().index() as i64).rem_euclid(5);
    match diff {
        1 => pick(Siksin, Sanggwan),
        2 => pick(Pyeonjae, Jeongjae),
        3 => pick(Pyeongwan, Jeonggwan),
        4 => pick(Pyeonin, Jeongin),
        _ => Undetermined,
    }
}

/// 각 기둥 천간의 십신. 일주 자리는 계산하지 않고 늘 [`TenGod::Bonwon`]이다.
pub fn ten_gods(pillars: &FourPillars) -> BTreeMap<PillarKey, TenGod> {
    let day = pillars.day.stem();
    pillars
        .entries()
        .into_iter()
        .map(|(key, pillar)| match key {
            PillarKey::Day => (key, TenGod::Bonwon),
            _ => (key, classify_ten_god(day, pillar.stem())),
        })
        .collect()
}

/// 일간 `day`에 대한 지지 `branch`의 십이운성
///
/// 일간의 장생 자리([`Stem::base_branch`])에서 `branch`까지 지지 순으로 몇 칸인지 센다.
///
/// # 예시
///
/// ```
/// use manse::saju::{Branch, Stem, TwelveStage, classify_twelve_stage};
///
/// assert_eq!(TwelveStage::Jangsaeng, classify_twelve_stage(Stem::Mu, Branch::In));
/// assert_eq!(TwelveStage::Yang, classify_twelve_stage(Stem::Mu, Branch::Chuk));
/// ```
pub fn classify_twelve_stage(day: Stem, branch: Branch) -> TwelveStage {
    let base = day.base_branch().index() as i64;
    TwelveStage::from_index(branch.index() as i64 - base)
}

/// 각 기둥 지지의 십이운성
pub fn twelve_stages(pillars: &FourPillars) -> BTreeMap<PillarKey, TwelveStage> {
    let day = pillars.day.stem();
    pillars
        .entries()
        .into_iter()
        .map(|(key, pillar)| (key, classify_twelve_stage(day, pillar.branch())))
        .collect()
}

/// 사주 분석 결과
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SajuProfile {
    pub pillars: FourPillars,
    pub five_elements: FiveElements,
    pub ten_gods: BTreeMap<PillarKey, TenGod>,
    pub twelve_stages: BTreeMap<PillarKey, TwelveStage>,
    pub great_fortune: GreatFortune,
}

/// 변환 결과와 현지 출생 시각으로 시주를 구하고 전체 분석을 만든다.
///
/// # 예시
///
/// ```
/// use manse::civil::{CivilTime, parse_instant};
/// use manse::saju::{Direction, Gender, Source, build_profile, convert};
///
/// let utc = parse_instant("2023-01-19T22:30:00Z").unwrap();
/// let conversion = convert(utc, 540, Source::OfflineApproximation).unwrap();
/// let local = CivilTime::from_utc(utc, 540).unwrap();
/// let profile = build_profile(&conversion, local, Gender::Male);
///
/// assert_eq!("병진", profile.pillars.hour.label());
/// assert_eq!(8, profile.five_elements.total());
/// assert_eq!(Direction::Forward, profile.great_fortune.direction);
/// assert_eq!(5, profile.great_fortune.start_age);
/// ```
pub fn build_profile(conversion: &ConversionResult, instant: CivilTime, gender: Gender) -> SajuProfile {
    let hour = derive_hour_pillar(conversion, instant);
    let pillars = FourPillars::with_hour(conversion, hour);
    let five_elements = classify_five_elements(&pillars);
    let ten_gods = ten_gods(&pillars);
    let twelve_stages = twelve_stages(&pillars);
    let great_fortune = fortune::compute_great_fortune(conversion, instant, gender);
    debug!(
        hour = %hour,
        direction = ?great_fortune.direction,
        start_age = great_fortune.start_age,
        "built saju profile"
    );
    SajuProfile {
        pillars,
        five_elements,
        ten_gods,
        twelve_stages,
        great_fortune,
    }
}
