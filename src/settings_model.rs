//! Editor settings model.
//!
//! [`SettingsModel`] is the single source of truth for which layout is
//! selected and applied, the template and custom layout lists, shortcut
//! assignments and modifier-key state. It is created per editor session and
//! passed explicitly to whatever needs it; cloning it clones the handle, not
//! the state.
//!
//! Every mutation finishes updating state before publishing a [`Property`]
//! notification, so subscribers always observe a consistent model.

use crate::config::{Config, Strings, TemplateDefaults};
use crate::constants::MAX_ZONE_COUNT;
use crate::models::{
    AppliedLayout, LayoutEntry, LayoutModel, LayoutRef, LayoutType, MonitorOrientation,
    ShortcutChange, ShortcutKey, ShortcutMap,
};
use crate::notify::{Notifier, ObservableList, SubscriptionId};
use crate::services::{shortcut_display_entries, ShortcutDisplayEntry, ZoneEngine};
use anyhow::{Context, Result};
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Model properties observers can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Template list or a template's parameters
    TemplateLayouts,
    /// Custom layout membership or order
    CustomLayouts,
    /// Shortcut assignments
    Shortcuts,
    /// Shortcut display list
    ShortcutDisplay,
    /// Selected layout
    SelectedLayout,
    /// Applied layout
    AppliedLayout,
    /// Default layout of either orientation
    DefaultLayouts,
    /// Shift modifier state
    ShiftPressed,
    /// Ctrl modifier state
    CtrlPressed,
}

struct ModelState {
    strings: Strings,
    template_defaults: TemplateDefaults,
    templates: ObservableList<LayoutRef>,
    templates_initialized: Cell<bool>,
    custom_layouts: ObservableList<LayoutRef>,
    // One shortcut listener per custom layout currently in `custom_layouts`.
    listeners: RefCell<Vec<(LayoutRef, SubscriptionId)>>,
    shortcuts: RefCell<ShortcutMap>,
    shortcut_display: ObservableList<ShortcutDisplayEntry>,
    selected: RefCell<Option<LayoutRef>>,
    applied: RefCell<Option<LayoutRef>>,
    default_vertical: RefCell<Option<LayoutRef>>,
    default_horizontal: RefCell<Option<LayoutRef>>,
    shift_pressed: Cell<bool>,
    ctrl_pressed: Cell<bool>,
    property_changed: Notifier<Property>,
}

impl Drop for ModelState {
    fn drop(&mut self) {
        for (layout, id) in self.listeners.get_mut().drain(..) {
            layout.shortcut_changed().unsubscribe(id);
        }
    }
}

/// Layout selection, shortcut and modifier state for one editor session.
#[derive(Clone)]
pub struct SettingsModel {
    state: Rc<ModelState>,
}

impl SettingsModel {
    /// Creates an empty model using the configured strings and template defaults.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config.strings.clone(), config.templates.clone())
    }

    /// Creates an empty model from explicit strings and template defaults.
    #[must_use]
    pub fn with_settings(strings: Strings, template_defaults: TemplateDefaults) -> Self {
        let model = Self {
            state: Rc::new(ModelState {
                strings,
                template_defaults,
                templates: ObservableList::new(),
                templates_initialized: Cell::new(false),
                custom_layouts: ObservableList::new(),
                listeners: RefCell::new(Vec::new()),
                shortcuts: RefCell::new(ShortcutMap::new()),
                shortcut_display: ObservableList::new(),
                selected: RefCell::new(None),
                applied: RefCell::new(None),
                default_vertical: RefCell::new(None),
                default_horizontal: RefCell::new(None),
                shift_pressed: Cell::new(false),
                ctrl_pressed: Cell::new(false),
                property_changed: Notifier::new(),
            }),
        };
        model.regenerate_shortcut_display();
        model
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Notifier for [`Property`] changes.
    pub fn property_changed(&self) -> &Notifier<Property> {
        &self.state.property_changed
    }

    /// Built-in templates, one per template type.
    pub fn templates(&self) -> &ObservableList<LayoutRef> {
        &self.state.templates
    }

    /// User-defined layouts, ordered by shortcut.
    pub fn custom_layouts(&self) -> &ObservableList<LayoutRef> {
        &self.state.custom_layouts
    }

    /// Presentation rows for the shortcut picker.
    pub fn shortcut_display(&self) -> &ObservableList<ShortcutDisplayEntry> {
        &self.state.shortcut_display
    }

    /// Current shortcut assignments.
    pub fn shortcuts(&self) -> Ref<'_, ShortcutMap> {
        self.state.shortcuts.borrow()
    }

    /// Display strings the model was created with.
    pub fn strings(&self) -> &Strings {
        &self.state.strings
    }

    /// Layout currently selected in the editor.
    #[must_use]
    pub fn selected(&self) -> Option<LayoutRef> {
        self.state.selected.borrow().clone()
    }

    /// Layout the host reports as active.
    #[must_use]
    pub fn applied(&self) -> Option<LayoutRef> {
        self.state.applied.borrow().clone()
    }

    /// Whether Shift is held.
    #[must_use]
    pub fn is_shift_pressed(&self) -> bool {
        self.state.shift_pressed.get()
    }

    /// Whether Ctrl is held.
    #[must_use]
    pub fn is_ctrl_pressed(&self) -> bool {
        self.state.ctrl_pressed.get()
    }

    /// Custom layout with the given id.
    #[must_use]
    pub fn find_custom(&self, id: Uuid) -> Option<LayoutRef> {
        let index = self.state.custom_layouts.position(|layout| layout.id() == id)?;
        self.state.custom_layouts.get(index)
    }

    /// Template of the given type. Always `None` for [`LayoutType::Custom`].
    #[must_use]
    pub fn find_template(&self, layout_type: LayoutType) -> Option<LayoutRef> {
        let index = self
            .state
            .templates
            .position(|layout| layout.layout_type() == layout_type)?;
        self.state.templates.get(index)
    }

    /// Default layout for monitors of the given orientation.
    #[must_use]
    pub fn default_layout(&self, orientation: MonitorOrientation) -> Option<LayoutRef> {
        self.default_slot(orientation).borrow().clone()
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    /// Creates one template per built-in type, in fixed order, and picks the
    /// default layouts (rows for vertical monitors, priority grid for
    /// horizontal ones).
    ///
    /// Only the first call has an effect; later calls are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured template name is invalid. Nothing is
    /// populated in that case.
    pub fn init_templates(&self, engine: &dyn ZoneEngine) -> Result<()> {
        if self.state.templates_initialized.get() {
            warn!("Template layouts already initialized, ignoring");
            return Ok(());
        }

        let defaults = &self.state.template_defaults;
        let mut templates = Vec::with_capacity(LayoutType::TEMPLATES.len());

        for layout_type in LayoutType::TEMPLATES {
            let name = self.state.strings.template_name(layout_type);
            let mut model = LayoutModel::template(name, layout_type)
                .with_context(|| format!("Invalid name for {layout_type} template"))?;

            model.zone_count = if layout_type == LayoutType::Blank {
                0
            } else {
                defaults.zone_count
            };
            model.spacing = defaults.spacing;
            model.show_spacing = defaults.show_spacing;
            model.sensitivity_radius = defaults.sensitivity_radius;
            engine.init_template_zones(&mut model);

            templates.push(LayoutEntry::new(model));
        }

        self.state.templates_initialized.set(true);

        let by_type = |layout_type: LayoutType| {
            templates
                .iter()
                .find(|layout: &&LayoutRef| layout.layout_type() == layout_type)
                .cloned()
        };
        *self.state.default_vertical.borrow_mut() = by_type(LayoutType::Rows);
        *self.state.default_horizontal.borrow_mut() = by_type(LayoutType::PriorityGrid);

        info!(count = templates.len(), "Initialized template layouts");
        self.state.templates.replace_all(templates);

        self.notify(Property::TemplateLayouts);
        self.notify(Property::DefaultLayouts);
        Ok(())
    }

    /// Regenerates zones of every template whose type matches `applied` and
    /// whose zones do not match the reported zone count. Other templates are
    /// left alone.
    ///
    /// Counts above [`MAX_ZONE_COUNT`] are capped. Returns how many templates
    /// were regenerated.
    pub fn refresh_template_zones(&self, applied: &AppliedLayout, engine: &dyn ZoneEngine) -> usize {
        let zone_count = Self::bounded_zone_count(applied);
        let mut refreshed = 0;

        for template in self.state.templates.snapshot() {
            if template.layout_type() != applied.layout_type
                || Self::zones_match(&template.model(), zone_count)
            {
                continue;
            }

            debug!(
                layout_type = %applied.layout_type,
                from = template.zone_count(),
                to = zone_count,
                "Regenerating template zones"
            );
            template.update(|model| {
                model.zone_count = zone_count;
                engine.init_template_zones(model);
            });
            refreshed += 1;
        }

        if refreshed > 0 {
            self.notify(Property::TemplateLayouts);
        }
        refreshed
    }

    fn bounded_zone_count(applied: &AppliedLayout) -> u32 {
        let zone_count = applied.bounded_zone_count();
        if zone_count != applied.zone_count {
            warn!(
                reported = applied.zone_count,
                max = MAX_ZONE_COUNT,
                "Reported zone count too large, capping"
            );
        }
        zone_count
    }

    // Blank templates never have zones.
    fn zones_match(model: &LayoutModel, zone_count: u32) -> bool {
        let expected = if model.layout_type == LayoutType::Blank {
            0
        } else {
            zone_count as usize
        };
        model.zone_count == zone_count && model.zones.len() == expected
    }

    /// Sets the default layout for an orientation.
    pub fn set_default_layout(&self, orientation: MonitorOrientation, layout: LayoutRef) {
        *self.default_slot(orientation).borrow_mut() = Some(layout);
        self.notify(Property::DefaultLayouts);
    }

    fn default_slot(&self, orientation: MonitorOrientation) -> &RefCell<Option<LayoutRef>> {
        match orientation {
            MonitorOrientation::Vertical => &self.state.default_vertical,
            MonitorOrientation::Horizontal => &self.state.default_horizontal,
        }
    }

    // ------------------------------------------------------------------
    // Custom layouts
    // ------------------------------------------------------------------

    /// Replaces the custom layout list.
    ///
    /// Previous members lose their shortcut listener and new members gain
    /// one. Layouts that leave the list release their shortcut, as with
    /// [`Self::remove_custom_layout`]. Shortcut keys carried by the new
    /// layouts are merged into the shortcut map. The list keeps its identity:
    /// it is cleared and refilled.
    pub fn set_custom_layouts(&self, layouts: Vec<LayoutRef>) {
        let previous = self.state.custom_layouts.snapshot();
        for layout in &previous {
            self.detach(layout);
            let id = layout.id();
            if layouts.iter().all(|kept| kept.id() != id) {
                self.state.shortcuts.borrow_mut().remove_layout(id);
                layout.sync_shortcut(ShortcutKey::NONE);
            }
        }

        self.state.custom_layouts.replace_all(layouts);

        for layout in self.state.custom_layouts.snapshot() {
            self.attach(&layout);
            let key = layout.shortcut();
            if !key.is_none() {
                self.record_shortcut(layout.id(), key);
            }
        }

        info!(
            count = self.state.custom_layouts.len(),
            "Replaced custom layouts"
        );
        self.after_membership_change();
    }

    /// Appends a custom layout. Returns false if a layout with the same id
    /// is already present.
    pub fn add_custom_layout(&self, layout: LayoutRef) -> bool {
        let id = layout.id();
        if self.find_custom(id).is_some() {
            warn!(%id, "Custom layout already present");
            return false;
        }

        self.state.custom_layouts.push(Rc::clone(&layout));
        self.attach(&layout);
        let key = layout.shortcut();
        if !key.is_none() {
            self.record_shortcut(id, key);
        }

        debug!(%id, "Added custom layout");
        self.after_membership_change();
        true
    }

    /// Removes a custom layout and releases its shortcut.
    pub fn remove_custom_layout(&self, id: Uuid) -> Option<LayoutRef> {
        let index = self.state.custom_layouts.position(|layout| layout.id() == id)?;
        let layout = self.state.custom_layouts.remove(index)?;

        self.detach(&layout);
        self.state.shortcuts.borrow_mut().remove_layout(id);
        layout.sync_shortcut(ShortcutKey::NONE);

        debug!(%id, "Removed custom layout");
        self.after_membership_change();
        Some(layout)
    }

    fn after_membership_change(&self) {
        self.clear_stale_pointers();
        self.regenerate_shortcut_display();
        self.sort_custom_layouts_by_shortcut();
        self.notify(Property::CustomLayouts);
    }

    fn attach(&self, layout: &LayoutRef) {
        let weak = Rc::downgrade(&self.state);
        let id = layout
            .shortcut_changed()
            .subscribe(move |change: &ShortcutChange| {
                if let Some(state) = weak.upgrade() {
                    Self { state }.on_shortcut_changed(change);
                }
            });
        self.state
            .listeners
            .borrow_mut()
            .push((Rc::clone(layout), id));
    }

    fn detach(&self, layout: &LayoutRef) {
        let mut listeners = self.state.listeners.borrow_mut();
        if let Some(index) = listeners
            .iter()
            .position(|(attached, _)| Rc::ptr_eq(attached, layout))
        {
            let (attached, id) = listeners.remove(index);
            attached.shortcut_changed().unsubscribe(id);
        }
    }

    fn contains_custom(&self, layout: &LayoutRef) -> bool {
        self.state
            .custom_layouts
            .position(|member| Rc::ptr_eq(member, layout))
            .is_some()
    }

    fn clear_stale_pointers(&self) {
        let is_stale = |slot: &RefCell<Option<LayoutRef>>| {
            slot.borrow()
                .as_ref()
                .is_some_and(|layout| layout.model().is_custom() && !self.contains_custom(layout))
        };

        if is_stale(&self.state.selected) {
            self.set_selected(None);
        }
        if is_stale(&self.state.applied) {
            self.set_applied(None);
        }
    }

    // ------------------------------------------------------------------
    // Shortcuts
    // ------------------------------------------------------------------

    /// Installs persisted shortcut assignments and syncs every custom
    /// layout's shortcut field to them.
    pub fn set_shortcut_map(&self, shortcuts: ShortcutMap) {
        *self.state.shortcuts.borrow_mut() = shortcuts;

        for layout in self.state.custom_layouts.snapshot() {
            let key = self.state.shortcuts.borrow().key_for(layout.id());
            layout.sync_shortcut(key);
        }

        self.regenerate_shortcut_display();
        self.sort_custom_layouts_by_shortcut();
        self.notify(Property::Shortcuts);
    }

    fn on_shortcut_changed(&self, change: &ShortcutChange) {
        debug!(
            layout = %change.layout_id,
            from = %change.previous,
            to = %change.current,
            "Custom layout shortcut changed"
        );
        self.record_shortcut(change.layout_id, change.current);
        self.regenerate_shortcut_display();
        self.sort_custom_layouts_by_shortcut();
        self.notify(Property::Shortcuts);
    }

    /// Binds `key` to `layout_id` in the map; a layout that held the key
    /// before has its field reset to none.
    fn record_shortcut(&self, layout_id: Uuid, key: ShortcutKey) {
        let displaced = self.state.shortcuts.borrow_mut().assign(key, layout_id);
        if let Some(displaced) = displaced.filter(|id| *id != layout_id) {
            debug!(%displaced, %key, "Shortcut reassigned");
            if let Some(layout) = self.find_custom(displaced) {
                layout.sync_shortcut(ShortcutKey::NONE);
            }
        }
    }

    /// Rebuilds the shortcut display list in place from the current shortcut
    /// map and custom layouts.
    pub fn regenerate_shortcut_display(&self) {
        let entries = {
            let shortcuts = self.state.shortcuts.borrow();
            self.state.custom_layouts.with_items(|layouts| {
                shortcut_display_entries(&shortcuts, layouts, &self.state.strings.no_shortcut)
            })
        };

        self.state.shortcut_display.replace_all(entries);
        self.notify(Property::ShortcutDisplay);
    }

    /// Orders custom layouts by assigned key; unassigned layouts go last and
    /// keep their relative order.
    pub fn sort_custom_layouts_by_shortcut(&self) {
        let shortcuts = self.state.shortcuts.borrow().clone();
        self.sort_custom_layouts_by(|layout| shortcuts.key_for(layout.id()).rank());
    }

    /// Stable sort of the custom layouts by `rank`.
    ///
    /// Items are moved one at a time, so layouts already in place are never
    /// removed from the list.
    pub fn sort_custom_layouts_by<K: Ord>(&self, rank: impl Fn(&LayoutEntry) -> K) {
        let mut target = self.state.custom_layouts.snapshot();
        target.sort_by_key(|layout| rank(&**layout));

        let mut moved = false;
        for (index, layout) in target.iter().enumerate() {
            let Some(from) = self
                .state
                .custom_layouts
                .position(|member| Rc::ptr_eq(member, layout))
            else {
                continue;
            };
            if from != index {
                self.state.custom_layouts.move_item(from, index);
                moved = true;
            }
        }

        if moved {
            debug!("Sorted custom layouts");
            self.notify(Property::CustomLayouts);
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Marks `layout` as selected, clearing the previous selection.
    pub fn set_selected(&self, layout: Option<LayoutRef>) {
        let previous = self.state.selected.replace(layout.clone());
        if let Some(previous) = previous {
            previous.set_selected(false);
        }
        if let Some(layout) = &layout {
            layout.set_selected(true);
        }
        self.notify(Property::SelectedLayout);
    }

    /// Marks `layout` as applied, clearing the previous one.
    pub fn set_applied(&self, layout: Option<LayoutRef>) {
        let previous = self.state.applied.replace(layout.clone());
        if let Some(previous) = previous {
            previous.set_applied(false);
        }
        if let Some(layout) = &layout {
            layout.set_applied(true);
        }
        self.notify(Property::AppliedLayout);
    }

    /// Finds the layout matching the host's report and makes it both
    /// selected and applied.
    ///
    /// Custom reports are matched by id. Template reports are matched by type,
    /// and the reported zone count (capped at [`MAX_ZONE_COUNT`]), spacing and
    /// sensitivity are copied onto the template. Zones are not regenerated
    /// here; call [`Self::refresh_template_zones`] for that, before or after.
    /// Without a match both selection and applied state are cleared and
    /// `None` is returned.
    pub fn resolve_applied_layout(&self, applied: &AppliedLayout) -> Option<LayoutRef> {
        let matched = if applied.layout_type == LayoutType::Custom {
            applied.uuid.and_then(|id| self.find_custom(id))
        } else {
            let zone_count = Self::bounded_zone_count(applied);
            self.find_template(applied.layout_type).map(|template| {
                template.update(|model| {
                    model.zone_count = zone_count;
                    model.show_spacing = applied.show_spacing;
                    model.spacing = applied.spacing;
                    model.sensitivity_radius = applied.sensitivity_radius;
                });
                template
            })
        };

        match &matched {
            Some(layout) => info!(
                layout_type = %applied.layout_type,
                name = %layout.name(),
                "Resolved applied layout"
            ),
            None => warn!(
                layout_type = %applied.layout_type,
                uuid = ?applied.uuid,
                "Applied layout not found"
            ),
        }

        self.set_selected(matched.clone());
        self.set_applied(matched.clone());
        matched
    }

    // ------------------------------------------------------------------
    // Modifier keys
    // ------------------------------------------------------------------

    /// Records the Shift state. Notifies only when it changes.
    pub fn set_shift_pressed(&self, pressed: bool) {
        if self.state.shift_pressed.replace(pressed) != pressed {
            self.notify(Property::ShiftPressed);
        }
    }

    /// Records the Ctrl state. Notifies only when it changes.
    pub fn set_ctrl_pressed(&self, pressed: bool) {
        if self.state.ctrl_pressed.replace(pressed) != pressed {
            self.notify(Property::CtrlPressed);
        }
    }

    fn notify(&self, property: Property) {
        self.state.property_changed.emit(&property);
    }
}

impl fmt::Debug for SettingsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsModel")
            .field("templates", &self.state.templates.len())
            .field("custom_layouts", &self.state.custom_layouts.len())
            .field("shortcuts", &*self.state.shortcuts.borrow())
            .field("selected", &self.selected().map(|l| l.id()))
            .field("applied", &self.applied().map(|l| l.id()))
            .finish_non_exhaustive()
    }
}
