//! Integration tests for the settings model.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use uuid::Uuid;
use zonedit::config::Config;
use zonedit::constants::MAX_ZONE_COUNT;
use zonedit::models::{
    AppliedLayout, LayoutModel, LayoutRef, LayoutType, ShortcutKey, ShortcutMap, Zone,
};
use zonedit::notify::ListChange;
use zonedit::services::{UniformZoneEngine, ZoneEngine};
use zonedit::{Property, SettingsModel};

mod fixtures;
use fixtures::*;

fn listener_count(layout: &LayoutRef) -> usize {
    layout.shortcut_changed().subscriber_count()
}

// ============================================================================
// Custom layout membership and listeners
// ============================================================================

#[test]
fn test_listeners_follow_membership() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    let c = custom_layout("C");

    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);
    assert_eq!(listener_count(&a), 1);
    assert_eq!(listener_count(&b), 1);
    assert_eq!(listener_count(&c), 0);

    model.set_custom_layouts(vec![Rc::clone(&b), Rc::clone(&c)]);
    assert_eq!(listener_count(&a), 0);
    assert_eq!(listener_count(&b), 1);
    assert_eq!(listener_count(&c), 1);

    model.add_custom_layout(Rc::clone(&a));
    assert_eq!(listener_count(&a), 1);

    model.remove_custom_layout(b.id()).unwrap();
    assert_eq!(listener_count(&b), 0);

    model.set_custom_layouts(Vec::new());
    for layout in [&a, &b, &c] {
        assert_eq!(listener_count(layout), 0);
    }
}

#[test]
fn test_detached_layout_no_longer_affects_model() {
    let model = test_model();
    let old = custom_layout("Old");
    model.set_custom_layouts(vec![Rc::clone(&old)]);
    model.set_custom_layouts(vec![custom_layout("New")]);

    old.set_shortcut(digit(4));

    assert!(model.shortcuts().is_empty());
    assert_eq!(display_labels(&model), vec!["None"]);
}

#[test]
fn test_replace_keeps_list_identity() {
    let model = test_model();
    model.set_custom_layouts(vec![custom_layout("A")]);

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    model
        .custom_layouts()
        .changes()
        .subscribe(move |change| sink.borrow_mut().push(*change));

    model.set_custom_layouts(vec![custom_layout("B"), custom_layout("C")]);

    assert_eq!(custom_names(&model), vec!["B", "C"]);
    assert_eq!(
        changes.borrow()[..3],
        [
            ListChange::Cleared,
            ListChange::Added { index: 0 },
            ListChange::Added { index: 1 },
        ]
    );
}

#[test]
fn test_replace_merges_quick_keys() {
    let model = test_model();
    let coding = custom_layout("Coding");
    coding.set_shortcut(digit(3));

    model.set_custom_layouts(vec![custom_layout("Writing"), Rc::clone(&coding)]);

    assert_eq!(model.shortcuts().get(digit(3)), Some(coding.id()));
    assert_eq!(display_labels(&model), vec!["None", "3 - Coding"]);
    assert_eq!(custom_names(&model), vec!["Coding", "Writing"]);
}

#[test]
fn test_replace_releases_departing_shortcuts() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);
    a.set_shortcut(digit(3));

    model.set_custom_layouts(vec![Rc::clone(&b)]);

    assert!(model.shortcuts().is_empty());
    assert_eq!(a.shortcut(), ShortcutKey::NONE);
    assert_eq!(display_labels(&model), vec!["None"]);
}

#[test]
fn test_replace_keeps_shortcuts_of_remaining_members() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);
    a.set_shortcut(digit(3));
    b.set_shortcut(digit(5));

    model.set_custom_layouts(vec![Rc::clone(&a), custom_layout("C")]);

    assert_eq!(model.shortcuts().len(), 1);
    assert_eq!(model.shortcuts().get(digit(3)), Some(a.id()));
    assert_eq!(a.shortcut(), digit(3));
    assert_eq!(display_labels(&model), vec!["None", "3 - A"]);
}

#[test]
fn test_replace_and_remove_release_alike() {
    let replaced = test_model();
    let removed = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");

    replaced.set_custom_layouts(vec![Rc::clone(&a)]);
    a.set_shortcut(digit(7));
    replaced.set_custom_layouts(Vec::new());

    removed.set_custom_layouts(vec![Rc::clone(&b)]);
    b.set_shortcut(digit(7));
    removed.remove_custom_layout(b.id()).unwrap();

    assert_eq!(display_labels(&replaced), display_labels(&removed));
    assert_eq!(a.shortcut(), b.shortcut());
}

// ============================================================================
// Shortcut display list
// ============================================================================

#[test]
fn test_display_list_order_and_omissions() {
    let model = test_model();
    let a = custom_layout("Alpha");
    let b = custom_layout("Beta");
    let c = custom_layout("Gamma");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b), Rc::clone(&c)]);

    c.set_shortcut(digit(9));
    a.set_shortcut(digit(5));
    b.set_shortcut(digit(0));

    assert_eq!(
        display_labels(&model),
        vec!["None", "0 - Beta", "5 - Alpha", "9 - Gamma"]
    );
}

#[test]
fn test_display_regeneration_is_idempotent() {
    let model = test_model();
    let a = custom_layout("Alpha");
    model.set_custom_layouts(vec![Rc::clone(&a)]);
    a.set_shortcut(digit(2));

    let first = model.shortcut_display().snapshot();
    model.regenerate_shortcut_display();
    let second = model.shortcut_display().snapshot();

    assert_eq!(first, second);
}

#[test]
fn test_display_shows_bare_key_for_unknown_id() {
    let model = test_model();
    let mut shortcuts = ShortcutMap::new();
    shortcuts.assign(digit(6), Uuid::new_v4());

    model.set_shortcut_map(shortcuts);

    assert_eq!(display_labels(&model), vec!["None", "6"]);
}

#[test]
fn test_display_regenerates_in_place() {
    let model = test_model();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    model
        .shortcut_display()
        .changes()
        .subscribe(move |change| sink.borrow_mut().push(*change));

    model.regenerate_shortcut_display();

    assert_eq!(
        *changes.borrow(),
        vec![ListChange::Cleared, ListChange::Added { index: 0 }]
    );
}

// ============================================================================
// Shortcut changes and sorting
// ============================================================================

#[test]
fn test_shortcut_change_resorts_synchronously() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    let c = custom_layout("C");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b), Rc::clone(&c)]);
    let log = record_properties(&model);

    c.set_shortcut(digit(1));

    assert_eq!(custom_names(&model), vec!["C", "A", "B"]);
    assert_eq!(display_labels(&model), vec!["None", "1 - C"]);
    let log = log.borrow();
    assert!(log.contains(&Property::ShortcutDisplay));
    assert!(log.contains(&Property::Shortcuts));
}

#[test]
fn test_sort_assigned_first_and_stable() {
    let model = test_model();
    let layouts: Vec<LayoutRef> = ["U1", "S7", "U2", "S2", "U3"]
        .iter()
        .map(|name| custom_layout(name))
        .collect();
    model.set_custom_layouts(layouts.clone());

    layouts[1].set_shortcut(digit(7));
    layouts[3].set_shortcut(digit(2));

    assert_eq!(custom_names(&model), vec!["S2", "S7", "U1", "U2", "U3"]);
}

#[test]
fn test_sort_moves_without_removing() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    model
        .custom_layouts()
        .changes()
        .subscribe(move |change| sink.borrow_mut().push(*change));

    b.set_shortcut(digit(0));

    assert_eq!(*changes.borrow(), vec![ListChange::Moved { from: 1, to: 0 }]);
    assert!(Rc::ptr_eq(&model.custom_layouts().get(0).unwrap(), &b));
}

#[test]
fn test_sort_by_external_rank() {
    let model = test_model();
    model.set_custom_layouts(vec![
        custom_layout("ccc"),
        custom_layout("a"),
        custom_layout("bb"),
    ]);

    model.sort_custom_layouts_by(|layout| layout.name().len());

    assert_eq!(custom_names(&model), vec!["a", "bb", "ccc"]);
}

#[test]
fn test_reassigning_key_displaces_previous_holder() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);

    a.set_shortcut(digit(4));
    b.set_shortcut(digit(4));

    assert_eq!(a.shortcut(), ShortcutKey::NONE);
    assert_eq!(b.shortcut(), digit(4));
    assert_eq!(display_labels(&model), vec!["None", "4 - B"]);
}

#[test]
fn test_clearing_shortcut_removes_entry() {
    let model = test_model();
    let a = custom_layout("A");
    model.set_custom_layouts(vec![Rc::clone(&a)]);

    a.set_shortcut(digit(8));
    a.set_shortcut(ShortcutKey::NONE);

    assert!(model.shortcuts().is_empty());
    assert_eq!(display_labels(&model), vec!["None"]);
}

#[test]
fn test_set_shortcut_map_syncs_layouts() {
    let model = test_model();
    let a = custom_layout("A");
    let b = custom_layout("B");
    a.set_shortcut(digit(1));
    model.set_custom_layouts(vec![Rc::clone(&a), Rc::clone(&b)]);

    let mut shortcuts = ShortcutMap::new();
    shortcuts.assign(digit(2), b.id());
    model.set_shortcut_map(shortcuts);

    assert_eq!(a.shortcut(), ShortcutKey::NONE);
    assert_eq!(b.shortcut(), digit(2));
    assert_eq!(custom_names(&model), vec!["B", "A"]);
}

// ============================================================================
// Selection and applied state
// ============================================================================

fn flagged(model: &SettingsModel, flag: fn(&LayoutRef) -> bool) -> usize {
    model
        .templates()
        .snapshot()
        .iter()
        .chain(model.custom_layouts().snapshot().iter())
        .filter(|layout| flag(layout))
        .count()
}

#[test]
fn test_selection_is_exclusive() {
    let model = test_model();
    let custom = custom_layout("Mine");
    model.set_custom_layouts(vec![Rc::clone(&custom)]);
    let grid = model.find_template(LayoutType::Grid).unwrap();

    model.set_selected(Some(Rc::clone(&grid)));
    model.set_selected(Some(Rc::clone(&custom)));

    assert!(!grid.is_selected());
    assert!(custom.is_selected());
    assert_eq!(flagged(&model, |l| l.is_selected()), 1);

    model.set_selected(None);
    assert_eq!(flagged(&model, |l| l.is_selected()), 0);
    assert!(model.selected().is_none());
}

#[test]
fn test_applied_independent_of_selection() {
    let model = test_model();
    let rows = model.find_template(LayoutType::Rows).unwrap();
    let focus = model.find_template(LayoutType::Focus).unwrap();
    let log = record_properties(&model);

    model.set_applied(Some(Rc::clone(&rows)));
    model.set_selected(Some(Rc::clone(&focus)));

    assert!(rows.is_applied() && !rows.is_selected());
    assert!(focus.is_selected() && !focus.is_applied());
    assert_eq!(
        *log.borrow(),
        vec![Property::AppliedLayout, Property::SelectedLayout]
    );
}

#[test]
fn test_subscriber_sees_new_state_during_notification() {
    let model = test_model();
    let grid = model.find_template(LayoutType::Grid).unwrap();
    let observed = Rc::new(Cell::new(false));

    let probe = model.clone();
    let sink = Rc::clone(&observed);
    model.property_changed().subscribe(move |property| {
        if *property == Property::SelectedLayout {
            let selected = probe.selected().is_some_and(|l| l.is_selected());
            sink.set(selected);
        }
    });

    model.set_selected(Some(grid));
    assert!(observed.get());
}

// ============================================================================
// Resolving the applied layout
// ============================================================================

#[test]
fn test_resolve_custom_by_id() {
    let model = test_model();
    let id = Uuid::new_v4();
    model.set_custom_layouts(vec![custom_layout("Other"), custom_layout_with_id(id, "Mine")]);

    let resolved = model.resolve_applied_layout(&AppliedLayout::custom(id)).unwrap();

    assert_eq!(resolved.id(), id);
    assert!(resolved.is_selected() && resolved.is_applied());
    assert!(Rc::ptr_eq(&model.selected().unwrap(), &resolved));
    assert!(Rc::ptr_eq(&model.applied().unwrap(), &resolved));
}

#[test]
fn test_resolve_unknown_custom_clears_state() {
    let model = test_model();
    let grid = model.find_template(LayoutType::Grid).unwrap();
    model.set_selected(Some(Rc::clone(&grid)));
    model.set_applied(Some(Rc::clone(&grid)));

    let resolved = model.resolve_applied_layout(&AppliedLayout::custom(Uuid::new_v4()));

    assert!(resolved.is_none());
    assert!(model.selected().is_none());
    assert!(model.applied().is_none());
    assert!(!grid.is_selected() && !grid.is_applied());
}

#[test]
fn test_resolve_custom_without_id_clears_state() {
    let model = test_model();
    let mut applied = AppliedLayout::custom(Uuid::new_v4());
    applied.uuid = None;

    assert!(model.resolve_applied_layout(&applied).is_none());
    assert!(model.applied().is_none());
}

#[test]
fn test_resolve_template_applies_parameters() {
    let model = test_model();
    let applied = AppliedLayout {
        layout_type: LayoutType::PriorityGrid,
        uuid: None,
        zone_count: 5,
        show_spacing: false,
        spacing: 2,
        sensitivity_radius: 40,
    };

    let resolved = model.resolve_applied_layout(&applied).unwrap();

    let layout = resolved.model();
    assert_eq!(layout.layout_type, LayoutType::PriorityGrid);
    assert_eq!(layout.zone_count, 5);
    assert!(!layout.show_spacing);
    assert_eq!(layout.spacing, 2);
    assert_eq!(layout.sensitivity_radius, 40);
    assert!(layout.is_selected && layout.is_applied);
}

#[test]
fn test_resolve_caps_zone_count() {
    let model = test_model();
    let resolved = model
        .resolve_applied_layout(&AppliedLayout::template(LayoutType::Columns, 5000))
        .unwrap();
    assert_eq!(resolved.zone_count(), MAX_ZONE_COUNT);
}

#[test]
fn test_resolve_before_templates_initialized() {
    let model = SettingsModel::new(&Config::new());
    let applied = AppliedLayout::template(LayoutType::Rows, 3);
    assert!(model.resolve_applied_layout(&applied).is_none());
}

// ============================================================================
// Template refresh
// ============================================================================

#[derive(Default)]
struct CountingEngine {
    calls: RefCell<Vec<LayoutType>>,
}

impl ZoneEngine for CountingEngine {
    fn init_template_zones(&self, layout: &mut LayoutModel) {
        self.calls.borrow_mut().push(layout.layout_type);
        UniformZoneEngine.init_template_zones(layout);
    }
}

#[test]
fn test_refresh_regenerates_only_matching_template() {
    let model = test_model();
    let before: Vec<Vec<Zone>> = model
        .templates()
        .snapshot()
        .iter()
        .map(|l| l.model().zones.clone())
        .collect();
    let engine = CountingEngine::default();

    let refreshed =
        model.refresh_template_zones(&AppliedLayout::template(LayoutType::Rows, 5), &engine);

    assert_eq!(refreshed, 1);
    assert_eq!(*engine.calls.borrow(), vec![LayoutType::Rows]);

    let rows = model.find_template(LayoutType::Rows).unwrap();
    assert_eq!(rows.zone_count(), 5);
    assert_eq!(rows.model().zones.len(), 5);

    for (layout, zones) in model.templates().snapshot().iter().zip(&before) {
        if layout.layout_type() != LayoutType::Rows {
            assert_eq!(&layout.model().zones, zones, "{}", layout.layout_type());
        }
    }
}

#[test]
fn test_refresh_same_zone_count_is_noop() {
    let model = test_model();
    let engine = CountingEngine::default();

    let refreshed =
        model.refresh_template_zones(&AppliedLayout::template(LayoutType::Grid, 3), &engine);

    assert_eq!(refreshed, 0);
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn test_refresh_caps_huge_zone_count() {
    let model = test_model();

    let refreshed = model.refresh_template_zones(
        &AppliedLayout::template(LayoutType::Grid, u32::MAX),
        &UniformZoneEngine,
    );

    assert_eq!(refreshed, 1);
    let grid = model.find_template(LayoutType::Grid).unwrap();
    assert_eq!(grid.zone_count(), MAX_ZONE_COUNT);
    assert_eq!(grid.model().zones.len(), MAX_ZONE_COUNT as usize);
}

#[test]
fn test_refresh_after_resolve_regenerates_zones() {
    let model = test_model();
    let applied = AppliedLayout::template(LayoutType::Rows, 6);

    model.resolve_applied_layout(&applied).unwrap();
    let rows = model.find_template(LayoutType::Rows).unwrap();
    assert_eq!(rows.zone_count(), 6);
    assert_eq!(rows.model().zones.len(), 3);

    let refreshed = model.refresh_template_zones(&applied, &UniformZoneEngine);

    assert_eq!(refreshed, 1);
    assert_eq!(rows.model().zones.len(), 6);
}

#[test]
fn test_refresh_blank_template_is_noop() {
    let model = test_model();
    let engine = CountingEngine::default();

    let refreshed =
        model.refresh_template_zones(&AppliedLayout::template(LayoutType::Blank, 0), &engine);

    assert_eq!(refreshed, 0);
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn test_refresh_ignores_custom_reports() {
    let model = test_model();
    let engine = CountingEngine::default();

    let refreshed = model.refresh_template_zones(&AppliedLayout::custom(Uuid::new_v4()), &engine);

    assert_eq!(refreshed, 0);
}
