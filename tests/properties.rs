use chrono::{DateTime, Utc};
use proptest::prelude::*;

use manse::Date;
use manse::civil::{CivilTime, KST_OFFSET_MINUTES};
use manse::saju::{
    Branch, Direction, Gender, Pillar, PillarKey, Polarity, Source, Stem, TenGod, TwelveStage,
    boundary, build_profile, classify_ten_god, classify_twelve_stage, convert, derive_day_pillar,
    derive_month_pillar,
};

/// Instants between 1800 and 2200.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (-5_364_662_400i64..7_258_118_400i64)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
}

fn arb_stem() -> impl Strategy<Value = Stem> {
    (0i64..10).prop_map(Stem::from_index)
}

fn arb_branch() -> impl Strategy<Value = Branch> {
    (0i64..12).prop_map(Branch::from_index)
}

fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

proptest! {
    /// The day pillar repeats every sixty days and advances by one each day.
    #[test]
    fn day_pillar_has_period_sixty(
        jdn in 2_000_000i64..2_600_000,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let t = CivilTime::new(Date::from_jdn(jdn), hour, minute, 0).unwrap();
        let later = CivilTime::new(Date::from_jdn(jdn + 60), hour, minute, 0).unwrap();
        let next = CivilTime::midnight(Date::from_jdn(jdn + 1));
        prop_assert_eq!(derive_day_pillar(t), derive_day_pillar(later));
        prop_assert_eq!(derive_day_pillar(t).step(1), derive_day_pillar(next));
    }

    /// Eight glyphs, eight element contributions.
    #[test]
    fn five_elements_sum_to_eight(instant in arb_instant(), gender in arb_gender()) {
        let conversion = convert(instant, KST_OFFSET_MINUTES, Source::OfflineApproximation).unwrap();
        let local = CivilTime::from_utc(instant, KST_OFFSET_MINUTES).unwrap();
        let profile = build_profile(&conversion, local, gender);
        prop_assert_eq!(8, profile.five_elements.total());
        prop_assert_eq!(TenGod::Bonwon, profile.ten_gods[&PillarKey::Day]);
        prop_assert_eq!(8, profile.great_fortune.cycles.len());
        prop_assert!(profile.great_fortune.start_age >= 1);
        for (_, pillar) in profile.pillars.entries() {
            let (stem, branch) = pillar.polarities();
            prop_assert_eq!(stem, branch);
        }
    }

    #[test]
    fn self_relation_is_a_peer_label(stem in arb_stem()) {
        let god = classify_ten_god(stem, stem);
        prop_assert!(matches!(god, TenGod::Bigyeon | TenGod::Geopjae));
    }

    #[test]
    fn ten_god_undetermined_only_for_same_element_pairs(day in arb_stem(), target in arb_stem()) {
        let god = classify_ten_god(day, target);
        let twin = day != target && day.element() == target.element();
        prop_assert_eq!(twin, god == TenGod::Undetermined);
        prop_assert_ne!(god, TenGod::Bonwon);
    }

    #[test]
    fn twelve_stage_is_total(stem in arb_stem(), branch in arb_branch()) {
        let stage = classify_twelve_stage(stem, branch);
        prop_assert!(TwelveStage::SEQUENCE.contains(&stage));
    }

    #[test]
    fn direction_depends_on_polarity_and_gender(stem in arb_stem(), gender in arb_gender()) {
        let forward = matches!(
            (stem.polarity(), gender),
            (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female)
        );
        let expected = if forward { Direction::Forward } else { Direction::Reverse };
        prop_assert_eq!(expected, Direction::of(stem, gender));
    }

    /// Indices -> pillar -> labels -> pillar -> indices is the identity.
    #[test]
    fn pillar_round_trip(index in 0i64..60) {
        let pillar = Pillar::from_cycle(index);
        let rebuilt = Pillar::from_indices(
            pillar.stem().index() as i64,
            pillar.branch().index() as i64,
        ).unwrap();
        prop_assert_eq!(pillar, rebuilt);
        prop_assert_eq!(pillar, pillar.label().parse::<Pillar>().unwrap());
        prop_assert_eq!(pillar, pillar.hanja_label().parse::<Pillar>().unwrap());
        prop_assert_eq!(index as u32, pillar.cycle_index());
    }

    /// A boundary instant belongs to the month it opens.
    #[test]
    fn boundaries_open_the_new_month(year in 1800i32..2200, entry in 0usize..12, stem in arb_stem()) {
        let (m, d, branch) = boundary::TRANSITIONS[entry];
        let at = CivilTime::midnight(Date::from_gregorian(year, m, d).unwrap());
        prop_assert_eq!(branch, derive_month_pillar(at, stem).branch());
        let before = CivilTime::new(Date::from_gregorian(year, m, d).unwrap() + -1, 23, 59, 59).unwrap();
        prop_assert_ne!(branch, derive_month_pillar(before, stem).branch());
    }
}
