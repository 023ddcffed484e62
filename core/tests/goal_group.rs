use beebot_core::{Goal, GoalGroup, Point, Sprite, SpriteId};

const STEP: i32 = 150;

struct Fixture {
    goal1: Goal,
    goal2: Goal,
    goal3: Goal,
    goal_group1: GoalGroup,
    goal_group2: GoalGroup,
}

fn fixture() -> Fixture {
    let sprite = Some(Sprite::Static(SpriteId::new(1)));
    let goal1 = Goal::new(sprite, Point::new(1, 1), STEP);
    let goal2 = Goal::new(sprite, Point::new(2, 2), STEP);
    let goal3 = Goal::new(sprite, Point::new(3, 2), STEP);

    let mut goal_group1 = GoalGroup::new();
    goal_group1.add(goal1.clone());
    goal_group1.add(goal2.clone());

    let mut goal_group2 = GoalGroup::new();
    goal_group2.add(goal2.clone());
    goal_group2.add(goal1.clone());

    Fixture {
        goal1,
        goal2,
        goal3,
        goal_group1,
        goal_group2,
    }
}

#[test]
fn reordered_groups_are_equal_when_unordered() {
    let mut f = fixture();
    f.goal_group1.set_ordered(false);
    f.goal_group2.set_ordered(false);

    assert_eq!(
        f.goal_group1, f.goal_group2,
        "two equal unordered groups must compare equal"
    );
}

#[test]
fn reordered_groups_differ_when_ordered() {
    let mut f = fixture();
    f.goal_group1.set_ordered(true);
    f.goal_group2.set_ordered(true);

    assert_ne!(
        f.goal_group1, f.goal_group2,
        "ordered groups with swapped goals must not compare equal"
    );
}

#[test]
fn mixed_ordering_is_never_equal() {
    let mut f = fixture();
    f.goal_group1.set_ordered(true);
    f.goal_group2.set_ordered(false);

    assert_ne!(f.goal_group1, f.goal_group2);
    assert_ne!(f.goal_group2, f.goal_group1);
}

#[test]
fn different_goals_are_unequal_when_unordered() {
    let mut f = fixture();
    let mut unequal = GoalGroup::with_ordering(false);
    unequal.add(f.goal2.clone());
    unequal.add(f.goal3.clone());
    f.goal_group1.set_ordered(false);

    assert_ne!(f.goal_group1, unequal);
}

#[test]
fn different_goals_are_unequal_when_ordered() {
    let mut f = fixture();
    let mut unequal = GoalGroup::with_ordering(true);
    unequal.add(f.goal2.clone());
    unequal.add(f.goal3.clone());
    f.goal_group1.set_ordered(true);

    assert_ne!(f.goal_group1, unequal);
}

#[test]
fn differently_sized_groups_are_unequal_in_either_mode() {
    let mut f = fixture();
    let mut larger = GoalGroup::new();
    larger.add(f.goal1.clone());
    larger.add(f.goal2.clone());
    larger.add(f.goal3.clone());

    for ordered in [true, false] {
        f.goal_group1.set_ordered(ordered);
        larger.set_ordered(ordered);
        assert_ne!(f.goal_group1, larger, "ordered = {ordered}");
    }
}

#[test]
fn independently_built_goals_compare_by_value() {
    let mut f = fixture();
    let sprite = Some(Sprite::Static(SpriteId::new(1)));
    let mut same = GoalGroup::with_ordering(false);
    same.add(Goal::new(sprite, Point::new(1, 1), STEP));
    same.add(Goal::new(sprite, Point::new(2, 2), STEP));
    f.goal_group1.set_ordered(false);

    assert_eq!(f.goal_group1, same);
}

#[test]
fn goals_with_a_different_sprite_are_not_equal() {
    let f = fixture();
    let other = Goal::new(Some(Sprite::Static(SpriteId::new(2))), Point::new(1, 1), STEP);

    assert_ne!(f.goal1, other);
}
