//! Four Pillars (saju)
//!
//! Note: 용어가 많아 이 모듈의 문서는 한국어로 쓴다.
//!
//! 태어난 시각(UTC)을 현지 상용시로 옮긴 뒤 연·월·일·시 네 기둥의 간지를 구하고, 그 위에 오행, 십신,
//! 십이운성, 대운을 얹는다. 월 경계는 실제 절입 시각이 아닌 고정된 양력 날짜표로 근사한다
//! ([`boundary`] 참고).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::civil::{self, CivilTime};
use crate::error::{Error, Result};

pub mod analysis;
pub mod boundary;
pub mod fortune;
pub mod symbols;

pub use analysis::{
    FiveElements, FourPillars, PillarKey, SajuProfile, build_profile, classify_five_elements,
    classify_ten_god, classify_twelve_stage,
};
pub use fortune::{DecadeCycle, Direction, Gender, GreatFortune, compute_great_fortune};
pub use symbols::{Branch, Element, Polarity, Stem, TenGod, TwelveStage};

/// 기둥 하나: 천간과 지지의 짝
///
/// 육십갑자 안에서는 천간과 지지의 음양이 언제나 같으므로, 이 타입으로 만들 수 있는 기둥도 그런 짝뿐이다.
///
/// # 예시
///
/// ```
/// use manse::saju::{Branch, Pillar, Stem};
///
/// let pillar: Pillar = "임인(壬寅)".parse().unwrap();
/// assert_eq!((Stem::Im, Branch::In), (pillar.stem(), pillar.branch()));
/// assert_eq!("壬寅", pillar.hanja_label());
/// assert_eq!(38, pillar.cycle_index());
/// assert!(Pillar::new(Stem::Gap, Branch::Chuk).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// 음양이 다른 짝이면 [`Error::InvalidPillar`]를 돌려준다.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self> {
        if stem.polarity() != branch.polarity() {
            return Err(Error::InvalidPillar(format!(
                "{}{} pairs {} stem with {} branch",
                stem.symbol(),
                branch.symbol(),
                stem.polarity().name(),
                branch.polarity().name()
            )));
        }
        Ok(Self { stem, branch })
    }
    /// 천간·지지 순서 번호로 기둥을 만든다. 번호는 각각 10, 12로 나눈 나머지를 쓴다.
    pub fn from_indices(stem: i64, branch: i64) -> Result<Self> {
        Self::new(Stem::from_index(stem), Branch::from_index(branch))
    }
    /// 육십갑자 순서 번호(갑자 = 0)로 기둥을 만든다. 음수도 받는다.
    pub fn from_cycle(index: i64) -> Self {
        Self::paired(index, index)
    }
    /// 같은 홀짝임이 보장된 번호 짝에만 쓴다.
    fn paired(stem: i64, branch: i64) -> Self {
        debug_assert_eq!(stem.rem_euclid(2), branch.rem_euclid(2));
        Self {
            stem: Stem::from_index(stem),
            branch: Branch::from_index(branch),
        }
    }

    pub fn stem(&self) -> Stem {
        self.stem
    }
    pub fn branch(&self) -> Branch {
        self.branch
    }
    /// 육십갑자 순서 번호, `0..60`
    pub fn cycle_index(&self) -> u32 {
        (6 * self.stem.index() as i64 - 5 * self.branch.index() as i64).rem_euclid(60) as u32
    }
    /// 기둥을 `steps`만큼 육십갑자 순으로 옮긴다. 음수면 거꾸로 간다.
    pub fn step(&self, steps: i64) -> Self {
        Self::from_cycle(self.cycle_index() as i64 + steps)
    }

    /// 한글 이름, 예: `"임인"`
    pub fn label(&self) -> String {
        self.stem.symbol().to_owned() + self.branch.symbol()
    }
    /// 한자 이름, 예: `"壬寅"`
    pub fn hanja_label(&self) -> String {
        self.stem.hanja().to_owned() + self.branch.hanja()
    }
    /// `(천간 오행, 지지 오행)`
    pub fn elements(&self) -> (Element, Element) {
        (self.stem.element(), self.branch.element())
    }
    /// `(천간 음양, 지지 음양)`
    pub fn polarities(&self) -> (Polarity, Polarity) {
        (self.stem.polarity(), self.branch.polarity())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

/// `"임인"`, `"壬寅"`, 또는 외부 역법 기관이 쓰는 `"임인(壬寅)"` 꼴을 읽는다.
impl FromStr for Pillar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        let invalid = || Error::InvalidPillar(format!("{s:?}"));
        let glyphs = match chars.as_slice() {
            [stem, branch] => (*stem, *branch),
            [stem, branch, '(', stem_hanja, branch_hanja, ')'] => {
                let echoed = parse_pair(*stem_hanja, *branch_hanja)?;
                let pillar = parse_pair(*stem, *branch)?;
                if echoed != pillar {
                    return Err(invalid());
                }
                return Ok(pillar);
            }
            _ => return Err(invalid()),
        };
        parse_pair(glyphs.0, glyphs.1)
    }
}

fn parse_pair(stem: char, branch: char) -> Result<Pillar> {
    let stem = Stem::from_symbol(&stem.to_string())
        .ok_or_else(|| Error::UnknownSymbol(stem.to_string()))?;
    let branch = Branch::from_symbol(&branch.to_string())
        .ok_or_else(|| Error::UnknownSymbol(branch.to_string()))?;
    Pillar::new(stem, branch)
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pillar", 10)?;
        state.serialize_field("stem", self.stem.symbol())?;
        state.serialize_field("stemHanja", self.stem.hanja())?;
        state.serialize_field("branch", self.branch.symbol())?;
        state.serialize_field("branchHanja", self.branch.hanja())?;
        state.serialize_field("stemElement", self.stem.element().name())?;
        state.serialize_field("branchElement", self.branch.element().name())?;
        state.serialize_field("stemYinYang", self.stem.polarity().name())?;
        state.serialize_field("branchYinYang", self.branch.polarity().name())?;
        state.serialize_field("labelKo", &self.label())?;
        state.serialize_field("labelHanja", &self.hanja_label())?;
        state.end()
    }
}

/// 변환 결과의 출처
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// 외부 역법 기관이 준 결과
    AuthoritativeRemote,
    /// 이 크레이트의 근사 알고리즘으로 구한 결과
    OfflineApproximation,
}

/// 양력 날짜. 입력 시각의 UTC 날짜를 그대로 돌려준다.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub iso_string: String,
}

/// 음력 날짜. 오프라인 근사에서는 현지 양력 날짜를 그대로 담고 윤달은 늘 `false`이다.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

/// 시주를 뺀 세 기둥
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct DatePillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
}

/// 날짜 변환 결과. 시주는 일간이 정해진 뒤 [`derive_hour_pillar`]로 따로 구한다.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ConversionResult {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub pillars: DatePillars,
    pub source: Source,
}

impl ConversionResult {
    pub fn day_stem(&self) -> Stem {
        self.pillars.day.stem()
    }
}

/// 일주. 율리우스일을 반올림한 날 번호(JDN)에 49를 더해 60으로 나눈 나머지가 육십갑자 번호이다.
///
/// # 예시
///
/// ```
/// use manse::Date;
/// use manse::civil::CivilTime;
/// use manse::saju::derive_day_pillar;
///
/// let t = CivilTime::new(Date::from_gregorian(2023, 1, 20).unwrap(), 7, 30, 0).unwrap();
/// assert_eq!("무인", derive_day_pillar(t).label());
/// ```
pub fn derive_day_pillar(instant: CivilTime) -> Pillar {
    Pillar::from_cycle(instant.date().sexagenary_index() as i64)
}

/// 연주. 입춘(2월 4일 0시) 전이면 전년으로 치며, 서기 4년(갑자)을 0번으로 센다.
pub fn derive_year_pillar(instant: CivilTime) -> Pillar {
    let year = boundary::effective_year(instant);
    Pillar::from_cycle(year as i64 - 4)
}

/// 월주. 지지는 경계표에서, 천간은 연간에서 정해진다(연간 × 2 + 인월부터 센 달 + 2).
pub fn derive_month_pillar(instant: CivilTime, year_stem: Stem) -> Pillar {
    let branch = boundary::month_span(instant).branch.index() as i64;
    let lunar_month = (branch + 10) % 12;
    let stem = (year_stem.index() as i64 * 2 + lunar_month + 2) % 10;
    Pillar::paired(stem, branch)
}

/// 시주. 23시부터 두 시간씩 자시·축시…로 나누고, 천간은 일간에서 정해진다(일간 × 2 + 시지).
pub fn derive_hour_pillar(conversion: &ConversionResult, instant: CivilTime) -> Pillar {
    let branch = ((instant.minutes_since_midnight() as i64 + 60) / 120) % 12;
    let stem = (conversion.day_stem().index() as i64 * 2 + branch) % 10;
    Pillar::paired(stem, branch)
}

/// 현지 시각으로 세 기둥을 구하고 날짜 정보와 함께 묶는다.
pub fn convert_civil(utc: DateTime<Utc>, local: CivilTime, source: Source) -> ConversionResult {
    use chrono::Datelike;

    let year = derive_year_pillar(local);
    let month = derive_month_pillar(local, year.stem());
    let day = derive_day_pillar(local);
    debug!(
        local = %local.iso(),
        year = %year,
        month = %month,
        day = %day,
        "derived date pillars"
    );

    let (ly, lm, ld) = local.date().gregorian();
    ConversionResult {
        solar: SolarDate {
            year: utc.year(),
            month: utc.month(),
            day: utc.day(),
            iso_string: civil::format_utc(utc),
        },
        lunar: LunarDate {
            year: ly,
            month: lm as u32,
            day: ld as u32,
            is_leap_month: false,
        },
        pillars: DatePillars { year, month, day },
        source,
    }
}

/// UTC 시각을 `offset_minutes` 분 앞선 현지 시각으로 옮겨 [`convert_civil`]을 부른다.
///
/// # 예시
///
/// ```
/// use manse::civil::parse_instant;
/// use manse::saju::{Source, convert};
///
/// let utc = parse_instant("2023-01-19T22:30:00Z").unwrap();
/// let conversion = convert(utc, 540, Source::OfflineApproximation).unwrap();
/// assert_eq!("임인", conversion.pillars.year.label());
/// assert_eq!("계축", conversion.pillars.month.label());
/// assert_eq!("무인", conversion.pillars.day.label());
/// ```
pub fn convert(utc: DateTime<Utc>, offset_minutes: i32, source: Source) -> Result<ConversionResult> {
    let local = CivilTime::from_utc(utc, offset_minutes)?;
    Ok(convert_civil(utc, local, source))
}
