//! 절입(節入) 경계표
//!
//! 월주는 음력 초하루가 아니라 열두 절기(節)를 경계로 바뀐다. 실제 절입 시각은 해마다 하루 안팎으로
//! 움직이지만, 이 모듈은 그 근삿값으로 양력 날짜를 고정한 표를 쓰며 경계 시각은 해당일 현지 0시로 본다.

use crate::civil::CivilTime;
use crate::date::{Date, gregorian_to_jdn};

use super::symbols::Branch;

/// 입춘 근삿값 `(월, 일)`. 해가 바뀌는 경계이기도 하다.
pub const START_OF_SPRING: (i32, i32) = (2, 4);

/// `(월, 일, 새 달의 지지)`. 소한부터 대설까지 양력 순서로 놓는다.
pub const TRANSITIONS: [(i32, i32, Branch); 12] = {
    use Branch::*;
    [
        (1, 5, Chuk),
        (2, 4, In),
        (3, 6, Myo),
        (4, 5, Jin),
        (5, 6, Sa),
        (6, 6, O),
        (7, 7, Mi),
        (8, 8, Sin),
        (9, 8, Yu),
        (10, 8, Sul),
        (11, 7, Hae),
        (12, 7, Ja),
    ]
};

/// 경계 하나: 이 시각부터 `branch` 달이 시작된다.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Boundary {
    pub at: CivilTime,
    pub branch: Branch,
}

/// 어떤 시각이 속한 절월
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MonthSpan {
    /// 현재 달의 지지
    pub branch: Branch,
    /// 현재 달이 시작된 경계
    pub start: CivilTime,
    /// 다음 달이 시작되는 경계
    pub next: CivilTime,
}

fn at(year: i32, month: i32, day: i32) -> CivilTime {
    CivilTime::midnight(Date::from_jdn(gregorian_to_jdn(year, month, day)))
}

/// 양력 `year` 년의 경계 목록. 앞뒤로 전년 대설과 다음 해 소한을 붙여 모두 14개이며, 시각 순으로
/// 정렬되어 있다.
pub fn checkpoints(year: i32) -> Vec<Boundary> {
    let mut points = Vec::with_capacity(TRANSITIONS.len() + 2);
    points.push(Boundary {
        at: at(year - 1, 12, 7),
        branch: Branch::Ja,
    });
    points.extend(TRANSITIONS.iter().map(|&(m, d, branch)| Boundary {
        at: at(year, m, d),
        branch,
    }));
    points.push(Boundary {
        at: at(year + 1, 1, 5),
        branch: Branch::Chuk,
    });
    points
}

/// 주어진 시각 이전(같은 시각 포함)의 가장 늦은 경계를 골라 그 달과 다음 경계를 돌려준다.
///
/// 경계와 정확히 같은 시각은 새 달에 속하며, 같은 시각에 경계가 여럿이면 목록에서 나중 것이 이긴다.
///
/// # 예시
///
/// ```
/// use manse::Date;
/// use manse::civil::CivilTime;
/// use manse::saju::{Branch, boundary};
///
/// let t = CivilTime::midnight(Date::from_gregorian(2023, 2, 4).unwrap());
/// let span = boundary::month_span(t);
/// assert_eq!(Branch::In, span.branch);
/// assert_eq!("2023-03-06", span.next.date().iso_gregorian());
/// ```
pub fn month_span(instant: CivilTime) -> MonthSpan {
    let year = instant.date().gregorian().0;
    let points = checkpoints(year);
    // 첫 경계는 전년 12월이므로 올해의 어느 시각이든 idx >= 1
    let idx = points.partition_point(|p| p.at <= instant).max(1);
    let current = points[idx - 1];
    let next = match points.get(idx) {
        Some(p) => p.at,
        None => checkpoints(year + 1)[1].at,
    };
    MonthSpan {
        branch: current.branch,
        start: current.at,
        next,
    }
}

/// 입춘 전이면 전년을, 아니면 양력 연도를 돌려준다.
pub fn effective_year(instant: CivilTime) -> i32 {
    let year = instant.date().gregorian().0;
    let (m, d) = START_OF_SPRING;
    if instant < at(year, m, d) {
        year - 1
    } else {
        year
    }
}
