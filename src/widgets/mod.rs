//! egui widgets shown on the demo page

pub mod chart;
pub mod date_time_picker;
pub mod document_upload;
pub mod multi_select;

use crate::picker::listener::ClickAwaySubscription;
use eframe::egui;

/// True when a pointer button went down this frame outside every rect in
/// `inside`. Only a popup holding a subscription can ask.
pub fn clicked_outside(
    _subscription: &ClickAwaySubscription,
    ctx: &egui::Context,
    inside: &[egui::Rect],
) -> bool {
    ctx.input(|i| {
        i.pointer.any_pressed()
            && i
                .pointer
                .interact_pos()
                .is_some_and(|pos| inside.iter().all(|rect| !rect.contains(pos)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::listener::ClickAwayListeners;

    fn press_at(ctx: &egui::Context, pos: egui::Pos2, inside: egui::Rect) -> bool {
        let sub = ClickAwayListeners::new().subscribe("test");
        let input = egui::RawInput {
            events: vec![
                egui::Event::PointerMoved(pos),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::default(),
                },
            ],
            ..Default::default()
        };
        let mut outside = false;
        let _ = ctx.run(input, |ctx| {
            outside = clicked_outside(&sub, ctx, &[inside]);
        });
        outside
    }

    #[test]
    fn press_outside_rect_is_reported() {
        let popup = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(100.0, 100.0));
        assert!(press_at(&egui::Context::default(), egui::pos2(300.0, 300.0), popup));
        assert!(!press_at(&egui::Context::default(), egui::pos2(50.0, 50.0), popup));
    }
}
