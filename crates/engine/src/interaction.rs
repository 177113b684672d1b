use crate::state::{BarState, PointerState};
use hyprbars_buttons::ButtonRegistry;
use hyprbars_core::{Action, CommandRunner, Point, PointerButton, PointerEvent, WindowMover};
use hyprbars_render::BarLayout;
use tracing::{debug, error};

/// Feed one pointer event to a bar and return what the host should do.
///
/// Only the left button interacts.  A press on a button fires its command on
/// release if the pointer is still on that button; a press on empty bar
/// space starts a window drag once the pointer moves.  A double click
/// (`clicks >= 2`, so a triple click still counts) runs `double_click`
/// instead when one is configured.
///
/// Drags are finished even when the bar went dirty in the meantime; anything
/// else needs a valid layout and is ignored until the next relayout.
pub fn handle_pointer(
    bar: &mut BarState,
    event: PointerEvent,
    registry: &ButtonRegistry,
    double_click: &str,
) -> Action {
    match bar.pointer {
        PointerState::DragPending { press } => return drag_pending(bar, event, press),
        PointerState::Dragging { last } => return dragging(bar, event, last),
        _ => {}
    }

    let pos = event.pos();
    let Some((in_bar, hit)) = bar.current_layout().map(|layout| {
        let in_bar = layout.bar.contains(pos);
        let hit = if in_bar { hit_test(layout, pos) } else { None };
        (in_bar, hit.map(|i| (i, layout.hitboxes[i].button)))
    }) else {
        return Action::None;
    };
    let hit_index = hit.map(|(i, _)| i);

    match (bar.pointer, event) {
        (
            PointerState::Pressed { index, clicks },
            PointerEvent::Up { button: PointerButton::Left, .. },
        ) => {
            bar.pointer = hover_state(hit_index);
            match hit {
                Some((i, button)) if i == index => {
                    if is_double(clicks, double_click) {
                        return Action::DoubleClick(double_click.to_string());
                    }
                    match registry.get(button) {
                        Some(spec) if !spec.command.is_empty() => Action::RunCommand(spec.command.clone()),
                        _ => Action::None,
                    }
                }
                _ => {
                    debug!(window = %bar.window(), button = index, "press cancelled");
                    Action::None
                }
            }
        }
        // Keep the press while the pointer wanders; release decides.
        (PointerState::Pressed { .. }, PointerEvent::Motion { .. }) => Action::None,
        (_, PointerEvent::Motion { .. }) => {
            bar.pointer = hover_state(hit_index);
            Action::None
        }
        (_, PointerEvent::Down { button: PointerButton::Left, clicks, .. }) if in_bar => match hit_index {
            Some(index) => {
                bar.pointer = PointerState::Pressed { index, clicks };
                Action::None
            }
            None if is_double(clicks, double_click) => {
                bar.pointer = PointerState::Idle;
                Action::DoubleClick(double_click.to_string())
            }
            None => {
                bar.pointer = PointerState::DragPending { press: pos };
                Action::None
            }
        },
        _ => Action::None,
    }
}

fn is_double(clicks: u32, double_click: &str) -> bool {
    clicks >= 2 && !double_click.is_empty()
}

fn drag_pending(bar: &mut BarState, event: PointerEvent, press: Point) -> Action {
    match event {
        PointerEvent::Motion { .. } => {
            // Deltas are measured from the press so the first step isn't lost.
            bar.pointer = PointerState::Dragging { last: press };
            Action::BeginMove { window: bar.window() }
        }
        PointerEvent::Up { button: PointerButton::Left, .. } => {
            bar.pointer = PointerState::Idle;
            Action::None
        }
        _ => Action::None,
    }
}

fn dragging(bar: &mut BarState, event: PointerEvent, last: Point) -> Action {
    match event {
        PointerEvent::Motion { pos } => {
            bar.pointer = PointerState::Dragging { last: pos };
            Action::MoveBy { window: bar.window(), delta: last.delta_to(pos) }
        }
        PointerEvent::Up { button: PointerButton::Left, .. } => {
            bar.pointer = PointerState::Idle;
            Action::EndMove { window: bar.window() }
        }
        _ => Action::None,
    }
}

fn hover_state(hit: Option<usize>) -> PointerState {
    hit.map_or(PointerState::Idle, PointerState::Hovering)
}

/// Hitbox under `pos`.  Layout never produces overlapping hitboxes; if it
/// ever does, the first one wins.
fn hit_test(layout: &BarLayout, pos: Point) -> Option<usize> {
    let mut hits = layout.hitboxes_at(pos);
    let first = hits.next()?;
    if let Some(second) = hits.next() {
        error!(first, second, x = pos.x, y = pos.y, "overlapping bar hitboxes");
        debug_assert!(false, "hitboxes {first} and {second} overlap");
    }
    Some(first)
}

/// Route an [`Action`] to the host collaborators.
pub fn perform<H>(action: Action, host: &mut H)
where
    H: CommandRunner + WindowMover,
{
    match action {
        Action::None => {}
        Action::BeginMove { window } => host.begin_move(window),
        Action::MoveBy { window, delta } => host.move_by(window, delta),
        Action::EndMove { window } => host.end_move(window),
        Action::RunCommand(command) | Action::DoubleClick(command) => {
            debug!(%command, "running bar command");
            host.run(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprbars_buttons::ButtonSpec;
    use hyprbars_core::{Rect, WindowId};
    use hyprbars_render::{LayoutConfig, NoIcons};

    const GEOMETRY: Rect = Rect::new(0.0, 20.0, 200.0, 100.0);

    fn setup(directives: &[&str]) -> (BarState, ButtonRegistry) {
        let mut reg = ButtonRegistry::new();
        for d in directives {
            reg.push(ButtonSpec::parse(d).unwrap());
        }
        let mut bar = BarState::new(WindowId(9));
        bar.ensure_layout(GEOMETRY, &LayoutConfig::default(), &reg, &mut NoIcons);
        (bar, reg)
    }

    fn center_of(bar: &BarState, i: usize) -> Point {
        bar.current_layout().unwrap().hitboxes[i].rect.center()
    }

    fn down(pos: Point, clicks: u32) -> PointerEvent {
        PointerEvent::Down { pos, button: PointerButton::Left, clicks }
    }

    fn up(pos: Point) -> PointerEvent {
        PointerEvent::Up { pos, button: PointerButton::Left }
    }

    /// Inside the bar, left of every right-aligned button.
    const EMPTY_BAR: Point = Point::new(20.0, 10.0);

    #[test]
    fn click_fires_exactly_one_command() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close", "rgb(00ff00), 10, , max"]);
        let p = center_of(&bar, 1);

        let actions = [
            handle_pointer(&mut bar, PointerEvent::Motion { pos: p }, &reg, ""),
            handle_pointer(&mut bar, down(p, 1), &reg, ""),
            handle_pointer(&mut bar, up(p), &reg, ""),
        ];
        let fired: Vec<_> = actions.iter().filter(|a| !a.is_none()).collect();
        assert_eq!(fired, [&Action::RunCommand("max".into())]);
        assert_eq!(bar.hovered(), Some(1));
    }

    #[test]
    fn release_outside_the_pressed_button_cancels() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close", "rgb(00ff00), 10, , max"]);
        let (a, b) = (center_of(&bar, 0), center_of(&bar, 1));

        assert_eq!(handle_pointer(&mut bar, down(a, 1), &reg, ""), Action::None);
        assert_eq!(bar.pressed(), Some(0));
        assert_eq!(handle_pointer(&mut bar, PointerEvent::Motion { pos: b }, &reg, ""), Action::None);
        assert_eq!(handle_pointer(&mut bar, up(b), &reg, ""), Action::None);
        assert_eq!(bar.hovered(), Some(1));

        handle_pointer(&mut bar, down(a, 1), &reg, "");
        assert_eq!(handle_pointer(&mut bar, up(Point::new(500.0, 500.0)), &reg, ""), Action::None);
        assert_eq!(bar.pointer_state(), PointerState::Idle);
    }

    #[test]
    fn empty_command_is_a_no_op() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , "]);
        let p = center_of(&bar, 0);
        handle_pointer(&mut bar, down(p, 1), &reg, "");
        assert_eq!(handle_pointer(&mut bar, up(p), &reg, ""), Action::None);
    }

    #[test]
    fn double_click_takes_precedence_when_configured() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        let p = center_of(&bar, 0);

        handle_pointer(&mut bar, down(p, 2), &reg, "fullscreen");
        assert_eq!(handle_pointer(&mut bar, up(p), &reg, "fullscreen"), Action::DoubleClick("fullscreen".into()));

        handle_pointer(&mut bar, down(p, 2), &reg, "");
        assert_eq!(handle_pointer(&mut bar, up(p), &reg, ""), Action::RunCommand("close".into()));
    }

    #[test]
    fn double_click_on_empty_bar_space() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        assert_eq!(
            handle_pointer(&mut bar, down(EMPTY_BAR, 2), &reg, "fullscreen"),
            Action::DoubleClick("fullscreen".into())
        );
        assert!(!bar.is_dragging());
    }

    #[test]
    fn triple_click_counts_as_a_double_click() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        let p = center_of(&bar, 0);

        handle_pointer(&mut bar, down(p, 3), &reg, "fullscreen");
        assert_eq!(handle_pointer(&mut bar, up(p), &reg, "fullscreen"), Action::DoubleClick("fullscreen".into()));
        assert_eq!(
            handle_pointer(&mut bar, down(EMPTY_BAR, 3), &reg, "fullscreen"),
            Action::DoubleClick("fullscreen".into())
        );
        assert_eq!(bar.pointer_state(), PointerState::Idle);
    }

    #[test]
    fn drag_region_moves_the_window() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        let window = WindowId(9);

        assert_eq!(handle_pointer(&mut bar, down(EMPTY_BAR, 1), &reg, ""), Action::None);
        assert!(bar.is_dragging());
        assert_eq!(
            handle_pointer(&mut bar, PointerEvent::Motion { pos: Point::new(25.0, 10.0) }, &reg, ""),
            Action::BeginMove { window }
        );
        assert_eq!(
            handle_pointer(&mut bar, PointerEvent::Motion { pos: Point::new(30.0, 40.0) }, &reg, ""),
            Action::MoveBy { window, delta: Point::new(10.0, 30.0) }
        );
        assert_eq!(handle_pointer(&mut bar, up(Point::new(30.0, 40.0)), &reg, ""), Action::EndMove { window });
        assert!(!bar.is_dragging());
    }

    #[test]
    fn click_without_motion_does_not_start_a_move() {
        let (mut bar, reg) = setup(&[]);
        handle_pointer(&mut bar, down(EMPTY_BAR, 1), &reg, "");
        assert_eq!(handle_pointer(&mut bar, up(EMPTY_BAR), &reg, ""), Action::None);
        assert_eq!(bar.pointer_state(), PointerState::Idle);
    }

    #[test]
    fn drags_finish_even_after_a_reload() {
        let (mut bar, reg) = setup(&[]);
        handle_pointer(&mut bar, down(EMPTY_BAR, 1), &reg, "");
        handle_pointer(&mut bar, PointerEvent::Motion { pos: Point::new(21.0, 10.0) }, &reg, "");
        bar.mark_dirty();
        assert_eq!(handle_pointer(&mut bar, up(EMPTY_BAR), &reg, ""), Action::EndMove { window: WindowId(9) });
    }

    #[test]
    fn other_buttons_and_outside_presses_are_ignored() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        let p = center_of(&bar, 0);
        let right = PointerEvent::Down { pos: p, button: PointerButton::Right, clicks: 1 };
        assert_eq!(handle_pointer(&mut bar, right, &reg, ""), Action::None);
        assert_eq!(bar.pressed(), None);

        assert_eq!(handle_pointer(&mut bar, down(Point::new(20.0, 80.0), 1), &reg, ""), Action::None);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn dirty_bars_ignore_input() {
        let (mut bar, reg) = setup(&["rgb(ff0000), 10, , close"]);
        let p = center_of(&bar, 0);
        bar.mark_dirty();
        assert_eq!(handle_pointer(&mut bar, down(p, 1), &reg, ""), Action::None);
        assert_eq!(bar.pointer_state(), PointerState::Idle);
    }

    #[derive(Default)]
    struct Host {
        commands: Vec<String>,
        moves:    Vec<(WindowId, Point)>,
        began:    usize,
        ended:    usize,
    }

    impl CommandRunner for Host {
        fn run(&mut self, command: &str) {
            self.commands.push(command.to_string());
        }
    }

    impl WindowMover for Host {
        fn begin_move(&mut self, _window: WindowId) {
            self.began += 1;
        }

        fn move_by(&mut self, window: WindowId, delta: Point) {
            self.moves.push((window, delta));
        }

        fn end_move(&mut self, _window: WindowId) {
            self.ended += 1;
        }
    }

    #[test]
    fn perform_routes_to_collaborators() {
        let mut host = Host::default();
        let window = WindowId(1);
        perform(Action::RunCommand("a".into()), &mut host);
        perform(Action::DoubleClick("b".into()), &mut host);
        perform(Action::BeginMove { window }, &mut host);
        perform(Action::MoveBy { window, delta: Point::new(1.0, 2.0) }, &mut host);
        perform(Action::EndMove { window }, &mut host);
        perform(Action::None, &mut host);

        assert_eq!(host.commands, ["a", "b"]);
        assert_eq!(host.moves, [(window, Point::new(1.0, 2.0))]);
        assert_eq!((host.began, host.ended), (1, 1));
    }
}
