//! 대운(大運)
//!
//! 양년생 남자와 음년생 여자는 월주에서 육십갑자 순으로, 나머지는 거꾸로 열 해씩 나아간다.
//! 대운이 시작되는 나이는 출생 시각부터 다음 절입까지의 날수를 3일 = 1년으로 환산한다.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::civil::CivilTime;
use crate::error::{Error, Result};

use super::symbols::{Polarity, Stem};
use super::{ConversionResult, Pillar, boundary};

/// 만드는 대운의 개수
pub const CYCLE_COUNT: usize = 8;

/// 대운 하나가 이어지는 햇수
pub const YEARS_PER_CYCLE: u32 = 10;

/// 성별
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(Error::UnknownGender(s.to_owned())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// 대운이 나아가는 방향
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// 연간 음양과 성별로 방향을 정한다.
    ///
    /// # 예시
    ///
    /// ```
    /// use manse::saju::{Direction, Gender, Stem};
    ///
    /// assert_eq!(Direction::Forward, Direction::of(Stem::Im, Gender::Male));
    /// assert_eq!(Direction::Reverse, Direction::of(Stem::Im, Gender::Female));
    /// assert_eq!(Direction::Forward, Direction::of(Stem::Gye, Gender::Female));
    /// ```
    pub fn of(year_stem: Stem, gender: Gender) -> Self {
        match (year_stem.polarity(), gender) {
            (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => Direction::Forward,
            _ => Direction::Reverse,
        }
    }
    /// 한 칸의 부호
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        })
    }
}

/// 열 해 단위 대운 하나
///
/// 직렬화하면 `{order, startAge, pillar: "갑인", pillarHanja: "甲寅", startYearOffset}`이다.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecadeCycle {
    /// 1부터 센 순서
    pub order: u32,
    /// 이 대운이 시작되는 나이
    pub start_age: u32,
    pub pillar: Pillar,
}

impl DecadeCycle {
    /// 출생 해로부터 이 대운이 시작되기까지의 햇수 (`start_age`와 같다)
    pub fn start_year_offset(&self) -> u32 {
        self.start_age
    }
}

impl Serialize for DecadeCycle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DecadeCycle", 5)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("startAge", &self.start_age)?;
        state.serialize_field("pillar", &self.pillar.label())?;
        state.serialize_field("pillarHanja", &self.pillar.hanja_label())?;
        state.serialize_field("startYearOffset", &self.start_year_offset())?;
        state.end()
    }
}

/// 대운 전체
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GreatFortune {
    pub direction: Direction,
    pub start_age: u32,
    pub cycles: Vec<DecadeCycle>,
}

/// 대운 시작 나이: 다음 절입까지의 날수 / 3 을 반올림하되 1 이상
///
/// 방향과 무관하게 늘 다음 절입을 기준으로 센다.
pub fn start_age(instant: CivilTime) -> u32 {
    let next = boundary::month_span(instant).next;
    let days = instant.days_until(next);
    ((days / 3.0).round() as u32).max(1)
}

/// 변환 결과의 연간과 월주, 출생 시각, 성별로 대운을 만든다.
///
/// 첫 대운은 월주에서 한 칸 옮긴 간지이고, `i`번째(0부터) 대운은 `i + 1`칸 옮긴 간지로
/// `start_age + 10 * i`세에 시작한다.
pub fn compute_great_fortune(
    conversion: &ConversionResult,
    instant: CivilTime,
    gender: Gender,
) -> GreatFortune {
    let direction = Direction::of(conversion.pillars.year.stem(), gender);
    let start_age = start_age(instant);
    let month = conversion.pillars.month;
    let cycles = (0..CYCLE_COUNT as u32)
        .map(|i| DecadeCycle {
            order: i + 1,
            start_age: start_age + i * YEARS_PER_CYCLE,
            pillar: month.step(direction.sign() * (i as i64 + 1)),
        })
        .collect();
    GreatFortune {
        direction,
        start_age,
        cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::parse_instant;
    use crate::date::Date;
    use crate::saju::{Source, convert};

    fn fortune(utc: &str, gender: Gender) -> GreatFortune {
        let utc = parse_instant(utc).unwrap();
        let conversion = convert(utc, 540, Source::OfflineApproximation).unwrap();
        let local = CivilTime::from_utc(utc, 540).unwrap();
        compute_great_fortune(&conversion, local, gender)
    }

    #[test]
    fn direction_truth_table() {
        use Direction::*;
        for stem in Stem::ALL {
            let (male, female) = match stem.polarity() {
                Polarity::Yang => (Forward, Reverse),
                Polarity::Yin => (Reverse, Forward),
            };
            assert_eq!(male, Direction::of(stem, Gender::Male), "{}", stem.symbol());
            assert_eq!(female, Direction::of(stem, Gender::Female), "{}", stem.symbol());
        }
    }

    #[test]
    fn forward_cycles() {
        let gf = fortune("2023-01-19T22:30:00Z", Gender::Male);
        assert_eq!(Direction::Forward, gf.direction);
        assert_eq!(5, gf.start_age);
        assert_eq!(CYCLE_COUNT, gf.cycles.len());
        let labels: Vec<_> = gf.cycles.iter().map(|c| c.pillar.label()).collect();
        assert_eq!(
            ["갑인", "을묘", "병진", "정사", "무오", "기미", "경신", "신유"],
            labels.as_slice()
        );
        for (i, cycle) in gf.cycles.iter().enumerate() {
            assert_eq!(i as u32 + 1, cycle.order);
            assert_eq!(5 + 10 * i as u32, cycle.start_age);
        }
    }

    #[test]
    fn reverse_cycles_wrap_below_zero() {
        let gf = fortune("2023-01-19T22:30:00Z", Gender::Female);
        assert_eq!(Direction::Reverse, gf.direction);
        assert_eq!("임자", gf.cycles[0].pillar.label());
        assert_eq!("을사", gf.cycles[7].pillar.label());

        // 갑자월 역행은 계해부터
        let gf = fortune("2023-12-20T03:00:00Z", Gender::Male);
        assert_eq!("갑자", convert_month("2023-12-20T03:00:00Z"));
        assert_eq!(Direction::Reverse, gf.direction);
        assert_eq!(5, gf.start_age);
        assert_eq!("계해", gf.cycles[0].pillar.label());
        assert_eq!("병진", gf.cycles[7].pillar.label());
    }

    fn convert_month(utc: &str) -> String {
        let utc = parse_instant(utc).unwrap();
        convert(utc, 540, Source::OfflineApproximation)
            .unwrap()
            .pillars
            .month
            .label()
    }

    #[test]
    fn cycle_json() {
        let gf = fortune("2023-01-19T22:30:00Z", Gender::Male);
        assert_eq!(
            serde_json::json!({
                "order": 2,
                "startAge": 15,
                "pillar": "을묘",
                "pillarHanja": "乙卯",
                "startYearOffset": 15,
            }),
            serde_json::to_value(gf.cycles[1]).unwrap()
        );
    }

    #[test]
    fn start_ages() {
        let at = |y, m, d, h| CivilTime::new(Date::from_gregorian(y, m, d).unwrap(), h, 0, 0).unwrap();
        for (std, instant) in [
            (10, at(2023, 2, 4, 0)),
            (1, at(2023, 2, 3, 23)),
            (5, at(2023, 12, 20, 0)),
            (5, at(2023, 1, 20, 12)),
        ] {
            assert_eq!(std, start_age(instant), "{}", instant.iso());
        }
    }

    #[test]
    fn gender_text() {
        assert_eq!(Ok(Gender::Male), "male".parse());
        assert_eq!(Ok(Gender::Female), " Female ".parse());
        assert_eq!(
            Err(Error::UnknownGender("other".into())),
            "other".parse::<Gender>()
        );
        assert_eq!("female", Gender::Female.to_string());
    }

    #[test]
    fn direction_text_matches_json() {
        for direction in [Direction::Forward, Direction::Reverse] {
            assert_eq!(
                serde_json::to_value(direction).unwrap(),
                direction.to_string(),
                "{direction:?}"
            );
        }
    }
}
