//! 천간·지지·오행 등 고정 기호표

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// 오행. 순서는 상생 순서(목→화→토→금→수→목)와 같다.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// 상생 순서대로 나열한 오행
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 상생 순환에서의 위치, `0..5`
    pub fn index(self) -> usize {
        self as usize
    }
    /// 영문 이름 (`"wood"` 등)
    pub fn name(self) -> &'static str {
        ["wood", "fire", "earth", "metal", "water"][self.index()]
    }
    pub fn hanja(self) -> &'static str {
        ["木", "火", "土", "金", "水"][self.index()]
    }
}

/// 음양
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    pub fn name(self) -> &'static str {
        match self {
            Polarity::Yang => "yang",
            Polarity::Yin => "yin",
        }
    }
}

/// 한 기호의 글자와 속성
struct Glyph {
    symbol: &'static str,
    hanja: &'static str,
    element: Element,
    polarity: Polarity,
}

const fn glyph(
    symbol: &'static str,
    hanja: &'static str,
    element: Element,
    polarity: Polarity,
) -> Glyph {
    Glyph {
        symbol,
        hanja,
        element,
        polarity,
    }
}

static STEMS: [Glyph; 10] = {
    use Element::*;
    use Polarity::*;
    [
        glyph("갑", "甲", Wood, Yang),
        glyph("을", "乙", Wood, Yin),
        glyph("병", "丙", Fire, Yang),
        glyph("정", "丁", Fire, Yin),
        glyph("무", "戊", Earth, Yang),
        glyph("기", "己", Earth, Yin),
        glyph("경", "庚", Metal, Yang),
        glyph("신", "辛", Metal, Yin),
        glyph("임", "壬", Water, Yang),
        glyph("계", "癸", Water, Yin),
    ]
};

static BRANCHES: [Glyph; 12] = {
    use Element::*;
    use Polarity::*;
    [
        glyph("자", "子", Water, Yang),
        glyph("축", "丑", Earth, Yin),
        glyph("인", "寅", Wood, Yang),
        glyph("묘", "卯", Wood, Yin),
        glyph("진", "辰", Earth, Yang),
        glyph("사", "巳", Fire, Yin),
        glyph("오", "午", Fire, Yang),
        glyph("미", "未", Earth, Yin),
        glyph("신", "申", Metal, Yang),
        glyph("유", "酉", Metal, Yin),
        glyph("술", "戌", Earth, Yang),
        glyph("해", "亥", Water, Yin),
    ]
};

/// 천간. 판별값이 곧 순서 번호(갑 = 0)이다.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

impl Stem {
    pub const ALL: [Stem; 10] = {
        use Stem::*;
        [Gap, Eul, Byeong, Jeong, Mu, Gi, Gyeong, Sin, Im, Gye]
    };

    /// 순서 번호로 천간을 얻는다. 범위를 벗어나면 10으로 나눈 나머지(음수 포함)를 쓴다.
    ///
    /// # 예시
    ///
    /// ```
    /// use manse::saju::Stem;
    ///
    /// assert_eq!(Stem::Im, Stem::from_index(8));
    /// assert_eq!(Stem::Gye, Stem::from_index(-1));
    /// ```
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }
    /// 한글 또는 한자 한 글자로 천간을 찾는다.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        STEMS
            .iter()
            .position(|g| g.symbol == symbol || g.hanja == symbol)
            .map(|i| Self::ALL[i])
    }

    pub fn index(self) -> usize {
        self as usize
    }
    pub fn symbol(self) -> &'static str {
        STEMS[self.index()].symbol
    }
    pub fn hanja(self) -> &'static str {
        STEMS[self.index()].hanja
    }
    pub fn element(self) -> Element {
        STEMS[self.index()].element
    }
    pub fn polarity(self) -> Polarity {
        STEMS[self.index()].polarity
    }

    /// 이 천간의 장생(長生) 자리, 즉 십이운성이 시작하는 지지
    pub fn base_branch(self) -> Branch {
        use Branch::*;
        [Hae, O, In, Sin, In, Sin, Sa, Hae, Sin, In][self.index()]
    }
}

/// 지지. 판별값이 곧 순서 번호(자 = 0)이다.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

impl Branch {
    pub const ALL: [Branch; 12] = {
        use Branch::*;
        [Ja, Chuk, In, Myo, Jin, Sa, O, Mi, Sin, Yu, Sul, Hae]
    };

    /// 순서 번호로 지지를 얻는다. 범위를 벗어나면 12로 나눈 나머지(음수 포함)를 쓴다.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }
    /// 한글 또는 한자 한 글자로 지지를 찾는다.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        BRANCHES
            .iter()
            .position(|g| g.symbol == symbol || g.hanja == symbol)
            .map(|i| Self::ALL[i])
    }

    pub fn index(self) -> usize {
        self as usize
    }
    pub fn symbol(self) -> &'static str {
        BRANCHES[self.index()].symbol
    }
    pub fn hanja(self) -> &'static str {
        BRANCHES[self.index()].hanja
    }
    pub fn element(self) -> Element {
        BRANCHES[self.index()].element
    }
    pub fn polarity(self) -> Polarity {
        BRANCHES[self.index()].polarity
    }

    /// 이 지지가 맡는 두 시간 구간 `(시작 시, 끝 시)`. 자시는 `(23, 1)`로 자정을 걸친다.
    ///
    /// # 예시
    ///
    /// ```
    /// use manse::saju::Branch;
    ///
    /// assert_eq!((23, 1), Branch::Ja.hours());
    /// assert_eq!((7, 9), Branch::Jin.hours());
    /// ```
    pub fn hours(self) -> (u32, u32) {
        let start = (self.index() as u32 * 2 + 23) % 24;
        (start, (start + 2) % 24)
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}
impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// 십신(十神). 일간을 기준으로 다른 천간과의 오행 생극 관계와 음양 일치 여부로 나눈다.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TenGod {
    /// 비견: 같은 오행, 같은 음양
    Bigyeon,
    /// 겁재: 같은 오행, 다른 음양
    Geopjae,
    /// 식신: 내가 생하는 오행, 같은 음양
    Siksin,
    /// 상관: 내가 생하는 오행, 다른 음양
    Sanggwan,
    /// 편재: 내가 극하는 오행, 같은 음양
    Pyeonjae,
    /// 정재: 내가 극하는 오행, 다른 음양
    Jeongjae,
    /// 편관: 나를 극하는 오행, 같은 음양
    Pyeongwan,
    /// 정관: 나를 극하는 오행, 다른 음양
    Jeonggwan,
    /// 편인: 나를 생하는 오행, 같은 음양
    Pyeonin,
    /// 정인: 나를 생하는 오행, 다른 음양
    Jeongin,
    /// 본원: 일주 자리에 고정으로 붙는 이름
    Bonwon,
    /// 미정: 오행만 같고 천간이 다를 때(갑·을 등)
    Undetermined,
}

impl TenGod {
    pub fn label(self) -> &'static str {
        use TenGod::*;
        match self {
            Bigyeon => "비견",
            Geopjae => "겁재",
            Siksin => "식신",
            Sanggwan => "상관",
            Pyeonjae => "편재",
            Jeongjae => "정재",
            Pyeongwan => "편관",
            Jeonggwan => "정관",
            Pyeonin => "편인",
            Jeongin => "정인",
            Bonwon => "본원",
            Undetermined => "미정",
        }
    }
    pub fn hanja(self) -> &'static str {
        use TenGod::*;
        match self {
            Bigyeon => "比肩",
            Geopjae => "劫財",
            Siksin => "食神",
            Sanggwan => "傷官",
            Pyeonjae => "偏財",
            Jeongjae => "正財",
            Pyeongwan => "偏官",
            Jeonggwan => "正官",
            Pyeonin => "偏印",
            Jeongin => "正印",
            Bonwon => "本元",
            Undetermined => "未定",
        }
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TenGod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 십이운성. 판별값이 장생에서 센 순서이다.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TwelveStage {
    Jangsaeng,
    Mogyok,
    Gwandae,
    Imgwan,
    Jewang,
    Soe,
    Byeong,
    Sa,
    Myo,
    Jeol,
    Tae,
    Yang,
}

impl TwelveStage {
    /// 장생부터 양까지의 순서
    pub const SEQUENCE: [TwelveStage; 12] = {
        use TwelveStage::*;
        [
            Jangsaeng, Mogyok, Gwandae, Imgwan, Jewang, Soe, Byeong, Sa, Myo, Jeol, Tae, Yang,
        ]
    };

    pub fn from_index(index: i64) -> Self {
        Self::SEQUENCE[index.rem_euclid(12) as usize]
    }
    pub fn label(self) -> &'static str {
        [
            "장생", "목욕", "관대", "임관", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
        ][self as usize]
    }
}

impl fmt::Display for TwelveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TwelveStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
