//! Canvas interaction: turns pointer, wheel and key input into selection
//! changes, live drags, transform previews, viewport moves and actions.
//!
//! ## Pointer behaviors
//!
//! | Press on | Plain | **Shift** |
//! |----------|-------|-----------|
//! | Handle of the single selected layer | Resize / rotate | same |
//! | Unselected layer | Select it, drag | Add to selection, drag |
//! | Selected layer | Drag the selection (click: select only it) | Remove from selection |
//! | Empty canvas | Clear selection, pan | Marquee select |
//!
//! A drag moves layers live and records one `"Move layer"` on release. A
//! handle gesture only updates a working frame (see
//! [`InteractionController::preview`]) and writes the store once on release,
//! recording `"Transform layer"`.

use crate::editor::Editor;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use kurbo::{Point, Rect};
use ld_core::{LayerId, ZoomDirection};
use ld_render::geometry::{Frame, origin_from_node};
use ld_render::handles::{Handle, handle_at, resize_frame, rotate_frame};
use ld_render::hit::{hit_test, hit_test_rect};
use ld_render::scene::{DisplayList, Preview};
use smallvec::SmallVec;

/// Node state reported by a renderer at the end of its own transform
/// gesture. `x, y` is the node origin (the mirrored box corner), scale is
/// relative to the stored size and may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees.
    pub rotation: f32,
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        start: Point,
        /// Stored origin of every moving layer at pointer-down.
        origins: SmallVec<[(LayerId, f32, f32); 4]>,
        /// Pressed an already-selected layer without shift: select only it
        /// if the pointer never moves.
        click_target: Option<LayerId>,
        moved: bool,
    },
    Transforming {
        id: LayerId,
        handle: Handle,
        base: Frame,
        working: Frame,
    },
    Panning {
        start: (f32, f32),
        pan: (f32, f32),
    },
    Marquee {
        start: Point,
        current: Point,
    },
}

pub struct InteractionController {
    gesture: Gesture,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

fn snap(v: f32, grid: f32) -> f32 {
    (v / grid).round() * grid
}

impl InteractionController {
    pub fn new() -> Self {
        Self { gesture: Gesture::Idle }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Working frame of an in-progress handle gesture.
    pub fn preview(&self) -> Option<Preview> {
        match self.gesture {
            Gesture::Transforming { id, working, .. } => Some(Preview { id, frame: working }),
            _ => None,
        }
    }

    /// Canvas-space rubber band of an in-progress marquee.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Marquee { start, current } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    pub fn display_list(&self, editor: &Editor) -> DisplayList {
        editor.display_list(self.preview())
    }

    /// Route one input event. Returns the shortcut action a key resolved to.
    pub fn handle_event(
        &mut self,
        editor: &mut Editor,
        event: &InputEvent,
    ) -> Option<ShortcutAction> {
        match event {
            InputEvent::PointerDown { x, y, modifiers } => {
                self.pointer_down(editor, *x, *y, *modifiers)
            }
            InputEvent::PointerMove { x, y, modifiers } => {
                self.pointer_move(editor, *x, *y, *modifiers)
            }
            InputEvent::PointerUp { x, y, modifiers } => {
                self.pointer_move(editor, *x, *y, *modifiers);
                self.pointer_up(editor);
            }
            InputEvent::Wheel { x, y, delta_y } => self.wheel(editor, *x, *y, *delta_y),
            InputEvent::Key { key, modifiers } => return self.key_down(editor, key, *modifiers),
        }
        None
    }

    fn to_canvas(editor: &Editor, sx: f32, sy: f32) -> Point {
        let (cx, cy) = editor.document.canvas.screen_to_canvas(sx, sy);
        Point::new(cx as f64, cy as f64)
    }

    /// The only selected layer, when it can show handles.
    fn handle_target(editor: &Editor) -> Option<Frame> {
        match editor.document.layers.selected_layers().as_slice() {
            [only] if only.visible && !only.locked => Some(Frame::of(only)),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, editor: &mut Editor, sx: f32, sy: f32, modifiers: Modifiers) {
        self.gesture = Gesture::Idle;
        let p = Self::to_canvas(editor, sx, sy);
        let zoom = editor.document.canvas.zoom() as f64;

        if let Some(frame) = Self::handle_target(editor)
            && let Some(handle) = handle_at(&frame, p, zoom)
            && let Some(id) = editor.document.layers.primary_selected()
        {
            self.gesture = Gesture::Transforming {
                id,
                handle,
                base: frame,
                working: frame,
            };
            return;
        }

        let store = &mut editor.document.layers;
        match hit_test(store.layers(), p) {
            Some(id) => {
                let mut click_target = None;
                if modifiers.shift {
                    store.toggle_selected(id);
                } else if store.is_selected(id) {
                    // Keep selection for drag
                    click_target = Some(id);
                } else {
                    store.select_only(id);
                }
                if !store.is_selected(id) {
                    return;
                }
                let origins = store
                    .selected_layers()
                    .iter()
                    .filter(|l| !l.locked)
                    .map(|l| (l.id, l.x, l.y))
                    .collect();
                self.gesture = Gesture::Dragging {
                    start: p,
                    origins,
                    click_target,
                    moved: false,
                };
            }
            None if modifiers.shift => {
                self.gesture = Gesture::Marquee { start: p, current: p };
            }
            None => {
                store.clear_selection();
                self.gesture = Gesture::Panning {
                    start: (sx, sy),
                    pan: editor.document.canvas.pan(),
                };
            }
        }
    }

    pub fn pointer_move(&mut self, editor: &mut Editor, sx: f32, sy: f32, modifiers: Modifiers) {
        let p = Self::to_canvas(editor, sx, sy);
        let min = editor.config.min_layer_size as f64;

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging {
                start, origins, moved, ..
            } => {
                let mut dx = (p.x - start.x) as f32;
                let mut dy = (p.y - start.y) as f32;
                if !*moved && dx == 0.0 && dy == 0.0 {
                    return;
                }
                // Shift: constrain to dominant axis
                if modifiers.shift {
                    if dx.abs() > dy.abs() {
                        dy = 0.0;
                    } else {
                        dx = 0.0;
                    }
                }
                *moved = true;
                for &(id, x0, y0) in origins.iter() {
                    editor.document.layers.modify(id, |l| {
                        l.x = x0 + dx;
                        l.y = y0 + dy;
                    });
                }
            }
            Gesture::Transforming {
                handle, base, working, ..
            } => {
                *working = if handle.is_rotate() {
                    rotate_frame(*base, p)
                } else {
                    resize_frame(*base, *handle, p, min)
                };
            }
            Gesture::Panning { start, pan } => {
                editor
                    .document
                    .canvas
                    .set_pan(pan.0 + sx - start.0, pan.1 + sy - start.1);
            }
            Gesture::Marquee { current, .. } => *current = p,
        }
    }

    /// Finish the current gesture. Returns whether a history entry was
    /// recorded.
    pub fn pointer_up(&mut self, editor: &mut Editor) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Dragging {
                origins,
                click_target,
                moved,
                ..
            } => {
                if !moved {
                    if let Some(id) = click_target {
                        editor.document.layers.select_only(id);
                    }
                    return false;
                }
                let canvas = *editor.document.canvas.state();
                if canvas.snap_enabled && canvas.grid_enabled {
                    let grid = editor.config.grid_size;
                    for &(id, _, _) in &origins {
                        editor.document.layers.modify(id, |l| {
                            l.x = snap(l.x, grid);
                            l.y = snap(l.y, grid);
                        });
                    }
                }
                editor.commit("Move layer")
            }
            Gesture::Transforming { id, base, working, .. } => {
                if working == base {
                    return false;
                }
                let min = editor.config.min_layer_size;
                editor.document.layers.modify(id, |l| {
                    l.x = working.x as f32;
                    l.y = working.y as f32;
                    l.width = (working.width as f32).abs().max(min);
                    l.height = (working.height as f32).abs().max(min);
                    l.rotation = working.rotation as f32;
                });
                editor.commit("Transform layer")
            }
            Gesture::Marquee { start, current } => {
                let rect = Rect::from_points(start, current);
                let store = &mut editor.document.layers;
                let mut selection = store.selected_ids().to_vec();
                selection.extend(hit_test_rect(store.layers(), rect));
                store.set_selection(selection);
                false
            }
            Gesture::Panning { .. } | Gesture::Idle => false,
        }
    }

    /// Abandon the current gesture, putting dragged layers back.
    pub fn cancel(&mut self, editor: &mut Editor) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        if let Gesture::Dragging { origins, .. } = gesture {
            for (id, x, y) in origins {
                editor.document.layers.modify(id, |l| {
                    l.x = x;
                    l.y = y;
                });
            }
        }
    }

    /// Wheel notch: zoom around the pointer. View-only, never recorded.
    pub fn wheel(&mut self, editor: &mut Editor, sx: f32, sy: f32, delta_y: f32) {
        let direction = if delta_y < 0.0 {
            ZoomDirection::In
        } else if delta_y > 0.0 {
            ZoomDirection::Out
        } else {
            return;
        };
        let step = editor.config.wheel_zoom_step;
        editor.document.canvas.zoom_at((sx, sy), direction, step);
    }

    /// A renderer finished dragging node `id` to `node` (its mirrored
    /// origin). Stores the matching layer origin and records `"Move layer"`.
    pub fn commit_drag(&mut self, editor: &mut Editor, id: LayerId, node: (f32, f32)) -> bool {
        let Some(layer) = editor.document.layers.get(id) else {
            return false;
        };
        let origin = origin_from_node(
            Point::new(node.0 as f64, node.1 as f64),
            layer.width as f64,
            layer.height as f64,
            layer.rotation as f64,
            layer.flip_x,
            layer.flip_y,
        );
        editor.document.layers.modify(id, |l| {
            l.x = origin.x as f32;
            l.y = origin.y as f32;
        });
        editor.commit("Move layer")
    }

    /// A renderer finished a transform of node `id`: bake the scale into
    /// the stored size (floored at the minimum), keep flips as flags and
    /// record `"Transform layer"`.
    pub fn commit_transform(&mut self, editor: &mut Editor, id: LayerId, t: NodeTransform) -> bool {
        let min = editor.config.min_layer_size;
        let Some(layer) = editor.document.layers.get(id) else {
            return false;
        };
        let width = (layer.width * t.scale_x).abs().max(min);
        let height = (layer.height * t.scale_y).abs().max(min);
        let origin = origin_from_node(
            Point::new(t.x as f64, t.y as f64),
            width as f64,
            height as f64,
            t.rotation as f64,
            layer.flip_x,
            layer.flip_y,
        );
        editor.document.layers.modify(id, |l| {
            l.x = origin.x as f32;
            l.y = origin.y as f32;
            l.width = width;
            l.height = height;
            l.rotation = t.rotation;
        });
        editor.commit("Transform layer")
    }

    /// Resolve and run a keyboard shortcut.
    pub fn key_down(
        &mut self,
        editor: &mut Editor,
        key: &str,
        m: Modifiers,
    ) -> Option<ShortcutAction> {
        let action = ShortcutMap::lookup(key, m)?;
        log::debug!("shortcut {key:?} -> {action:?}");
        let zoom_step = editor.config.button_zoom_step;

        match action {
            ShortcutAction::Undo => {
                self.cancel(editor);
                editor.undo();
            }
            ShortcutAction::Redo => {
                self.cancel(editor);
                editor.redo();
            }
            ShortcutAction::Delete => {
                self.cancel(editor);
                editor.delete_selected();
            }
            ShortcutAction::SelectAll => editor.document.layers.select_all(),
            ShortcutAction::Duplicate => {
                editor.duplicate_selected();
            }
            ShortcutAction::Deselect => {
                self.cancel(editor);
                editor.document.layers.clear_selection();
            }
            ShortcutAction::FlipHorizontal => {
                editor.flip_horizontal();
            }
            ShortcutAction::FlipVertical => {
                editor.flip_vertical();
            }
            ShortcutAction::ZoomIn => editor.document.canvas.zoom_in(zoom_step),
            ShortcutAction::ZoomOut => editor.document.canvas.zoom_out(zoom_step),
            ShortcutAction::ResetView => editor.document.canvas.reset_view(),
            ShortcutAction::ToggleGrid => editor.document.canvas.toggle_grid(),
            ShortcutAction::SendBackward => {
                editor.move_selected_down();
            }
            ShortcutAction::BringForward => {
                editor.move_selected_up();
            }
            ShortcutAction::SendToBack => {
                editor.send_selected_to_back();
            }
            ShortcutAction::BringToFront => {
                editor.bring_selected_to_front();
            }
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::{ImageRef, Layer};
    use pretty_assertions::assert_eq;

    fn setup() -> (Editor, InteractionController, LayerId, LayerId) {
        let mut editor = Editor::default();
        let back = Layer::image("back", ImageRef::new("b.png"), 200.0, 200.0).at(0.0, 0.0);
        let front = Layer::image("front", ImageRef::new("f.png"), 100.0, 100.0).at(300.0, 0.0);
        let ids = editor.insert_batch(vec![back, front], "Add layers");
        (editor, InteractionController::new(), ids[0], ids[1])
    }

    fn click(ctl: &mut InteractionController, editor: &mut Editor, x: f32, y: f32, m: Modifiers) {
        ctl.pointer_down(editor, x, y, m);
        ctl.pointer_up(editor);
    }

    fn pos(editor: &Editor, id: LayerId) -> (f32, f32) {
        editor.document.layers.get(id).map(|l| (l.x, l.y)).unwrap_or_default()
    }

    #[test]
    fn click_selects_and_empty_click_clears() {
        let (mut editor, mut ctl, back, front) = setup();
        click(&mut ctl, &mut editor, 350.0, 50.0, Modifiers::NONE);
        assert_eq!(editor.document.layers.selected_ids(), &[front]);

        click(&mut ctl, &mut editor, 50.0, 50.0, Modifiers::SHIFT);
        assert_eq!(editor.document.layers.selected_ids(), &[front, back]);

        click(&mut ctl, &mut editor, 350.0, 50.0, Modifiers::SHIFT);
        assert_eq!(editor.document.layers.selected_ids(), &[back]);

        click(&mut ctl, &mut editor, 900.0, 700.0, Modifiers::NONE);
        assert!(editor.document.layers.selected_ids().is_empty());
        assert_eq!(editor.history.past_len(), 2);
    }

    #[test]
    fn click_inside_multi_selection_narrows_it() {
        let (mut editor, mut ctl, back, front) = setup();
        editor.document.layers.set_selection([back, front]);
        click(&mut ctl, &mut editor, 350.0, 50.0, Modifiers::NONE);
        assert_eq!(editor.document.layers.selected_ids(), &[front]);
    }

    #[test]
    fn drag_moves_selection_with_one_record() {
        let (mut editor, mut ctl, back, front) = setup();
        editor.document.layers.set_selection([back, front]);
        editor.document.canvas.toggle_snap();

        ctl.pointer_down(&mut editor, 350.0, 50.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 360.0, 55.0, Modifiers::NONE);
        assert_eq!(pos(&editor, front), (310.0, 5.0));
        ctl.pointer_move(&mut editor, 373.0, 61.0, Modifiers::NONE);
        assert!(ctl.pointer_up(&mut editor));

        assert_eq!(pos(&editor, front), (323.0, 11.0));
        assert_eq!(pos(&editor, back), (23.0, 11.0));
        assert_eq!(editor.document.layers.selected_ids().len(), 2);
        assert_eq!(editor.history.undo_label(), Some("Move layer"));
        assert_eq!(editor.history.past_len(), 3);

        editor.undo();
        assert_eq!(pos(&editor, front), (300.0, 0.0));
    }

    #[test]
    fn drag_snaps_when_grid_and_snap_are_on() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.canvas.toggle_grid();
        ctl.pointer_down(&mut editor, 350.0, 50.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 363.0, 58.0, Modifiers::NONE);
        ctl.pointer_up(&mut editor);
        assert_eq!(pos(&editor, front), (320.0, 0.0));
    }

    #[test]
    fn locked_layers_are_not_hit() {
        let (mut editor, mut ctl, back, front) = setup();
        editor.document.layers.modify(front, |l| {
            l.locked = true;
            l.x = 0.0;
        });
        click(&mut ctl, &mut editor, 50.0, 50.0, Modifiers::NONE);
        assert_eq!(editor.document.layers.selected_ids(), &[back]);
    }

    #[test]
    fn handle_resize_previews_then_commits() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.select_only(front);

        // Bottom-right handle of front sits at (400, 100).
        ctl.pointer_down(&mut editor, 401.0, 101.0, Modifiers::NONE);
        assert!(matches!(ctl.gesture(), Gesture::Transforming { handle: Handle::BottomRight, .. }));
        ctl.pointer_move(&mut editor, 450.0, 180.0, Modifiers::NONE);

        assert_eq!(editor.document.layers.get(front).map(|l| l.width), Some(100.0));
        let preview = ctl.preview().map(|p| (p.frame.width, p.frame.height));
        assert_eq!(preview, Some((150.0, 180.0)));
        assert_eq!(ctl.display_list(&editor).item(front).map(|i| i.size.width), Some(150.0));

        assert!(ctl.pointer_up(&mut editor));
        let l = editor.document.layers.get(front).cloned();
        assert_eq!(l.map(|l| (l.x, l.y, l.width, l.height)), Some((300.0, 0.0, 150.0, 180.0)));
        assert_eq!(editor.history.undo_label(), Some("Transform layer"));
    }

    #[test]
    fn resize_is_floored() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.select_only(front);
        ctl.pointer_down(&mut editor, 400.0, 100.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 0.0, -500.0, Modifiers::NONE);
        ctl.pointer_up(&mut editor);
        let l = editor.document.layers.get(front).cloned();
        assert_eq!(l.map(|l| (l.x, l.y, l.width, l.height)), Some((300.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn handle_press_without_move_records_nothing() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.select_only(front);
        ctl.pointer_down(&mut editor, 400.0, 100.0, Modifiers::NONE);
        assert!(!ctl.pointer_up(&mut editor));
        assert_eq!(editor.history.past_len(), 2);
    }

    #[test]
    fn commit_transform_bakes_scale_and_compensates_flip() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.modify(front, |l| l.flip_x = true);

        let t = NodeTransform {
            x: 510.0,
            y: 20.0,
            scale_x: -2.0,
            scale_y: 0.01,
            rotation: 0.0,
        };
        assert!(ctl.commit_transform(&mut editor, front, t));
        let l = editor.document.layers.get(front).cloned();
        assert_eq!(l.map(|l| (l.x, l.y, l.width, l.height)), Some((310.0, 20.0, 200.0, 5.0)));
        assert_eq!(editor.history.undo_label(), Some("Transform layer"));
    }

    #[test]
    fn commit_drag_maps_node_origin_back() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.modify(front, |l| l.flip_x = true);
        assert!(ctl.commit_drag(&mut editor, front, (150.0, 40.0)));
        assert_eq!(pos(&editor, front), (50.0, 40.0));
        assert!(!ctl.commit_drag(&mut editor, LayerId::intern("missing"), (0.0, 0.0)));
    }

    #[test]
    fn empty_drag_pans_without_history() {
        let (mut editor, mut ctl, _, _) = setup();
        ctl.pointer_down(&mut editor, 900.0, 700.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 930.0, 690.0, Modifiers::NONE);
        assert!(!ctl.pointer_up(&mut editor));
        assert_eq!(editor.document.canvas.pan(), (30.0, -10.0));
        assert_eq!(editor.history.past_len(), 2);
    }

    #[test]
    fn shift_drag_on_empty_canvas_marquee_selects() {
        let (mut editor, mut ctl, back, front) = setup();
        ctl.pointer_down(&mut editor, 250.0, 150.0, Modifiers::SHIFT);
        ctl.pointer_move(&mut editor, 450.0, 50.0, Modifiers::SHIFT);
        assert!(ctl.marquee_rect().is_some());
        ctl.pointer_up(&mut editor);
        assert_eq!(editor.document.layers.selected_ids(), &[front]);
        assert!(!editor.document.layers.is_selected(back));
    }

    #[test]
    fn wheel_zooms_around_pointer() {
        let (mut editor, mut ctl, _, _) = setup();
        ctl.wheel(&mut editor, 200.0, 100.0, -120.0);
        assert!((editor.document.canvas.zoom() - 1.05).abs() < 1e-6);
        let (sx, sy) = editor.document.canvas.canvas_to_screen(200.0, 100.0);
        assert!((sx - 200.0).abs() < 1e-3 && (sy - 100.0).abs() < 1e-3);
        ctl.wheel(&mut editor, 200.0, 100.0, 0.0);
        assert!((editor.document.canvas.zoom() - 1.05).abs() < 1e-6);
    }

    #[test]
    fn keyboard_delete_respects_modifiers() {
        let (mut editor, mut ctl, _, front) = setup();
        editor.document.layers.select_only(front);

        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(ctl.key_down(&mut editor, "Backspace", cmd), None);
        assert!(editor.document.layers.contains(front));

        let event = InputEvent::key("Delete", Modifiers::NONE);
        assert_eq!(ctl.handle_event(&mut editor, &event), Some(ShortcutAction::Delete));
        assert!(!editor.document.layers.contains(front));

        let undo = InputEvent::key("z", cmd);
        ctl.handle_event(&mut editor, &undo);
        assert!(editor.document.layers.contains(front));
    }

    #[test]
    fn drag_back_to_start_records_nothing() {
        let (mut editor, mut ctl, _, front) = setup();
        let before = editor.history.past_len();
        ctl.pointer_down(&mut editor, 350.0, 50.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 390.0, 70.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 350.0, 50.0, Modifiers::NONE);
        assert!(!ctl.pointer_up(&mut editor));
        assert_eq!(pos(&editor, front), (300.0, 0.0));
        assert_eq!(editor.history.past_len(), before);
        assert_eq!(editor.history.can_undo(), editor.undo().is_some());
    }

    #[test]
    fn shift_drag_commits_axis_locked_position() {
        let (mut editor, mut ctl, _, front) = setup();
        let events = [
            InputEvent::PointerDown {
                x: 350.0,
                y: 50.0,
                modifiers: Modifiers::SHIFT,
            },
            InputEvent::PointerMove {
                x: 450.0,
                y: 60.0,
                modifiers: Modifiers::SHIFT,
            },
            InputEvent::PointerUp {
                x: 450.0,
                y: 60.0,
                modifiers: Modifiers::SHIFT,
            },
        ];
        for event in &events {
            ctl.handle_event(&mut editor, event);
        }
        assert_eq!(pos(&editor, front), (400.0, 0.0));
        assert_eq!(editor.history.undo_label(), Some("Move layer"));

        editor.undo();
        editor.redo();
        assert_eq!(pos(&editor, front), (400.0, 0.0));
    }

    #[test]
    fn escape_cancels_drag() {
        let (mut editor, mut ctl, _, front) = setup();
        ctl.pointer_down(&mut editor, 350.0, 50.0, Modifiers::NONE);
        ctl.pointer_move(&mut editor, 380.0, 80.0, Modifiers::NONE);
        ctl.key_down(&mut editor, "Escape", Modifiers::NONE);
        assert_eq!(pos(&editor, front), (300.0, 0.0));
        assert!(editor.document.layers.selected_ids().is_empty());
        assert_eq!(ctl.gesture(), &Gesture::Idle);
    }
}
