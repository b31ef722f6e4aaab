use engine::{InputAction, InputSnapshot, InputSource};

/// Scripted input that walks the player through one full prep run against
/// the default station layout: grab a cabbage from the crate, chop it on the
/// cutting board, and drop the result on the pass-through counter.
#[derive(Debug, Default)]
pub(crate) struct DemoInputSource {
    tick: u64,
}

impl InputSource for DemoInputSource {
    fn next_snapshot(&mut self) -> InputSnapshot {
        let snapshot = snapshot_for_tick(self.tick);
        self.tick = self.tick.saturating_add(1);
        snapshot
    }
}

fn snapshot_for_tick(tick: u64) -> InputSnapshot {
    let held = |action: InputAction| InputSnapshot::empty().with_action_down(action, true);

    match tick {
        // Walk right to the cabbage crate, then push up against it to face it.
        0..=23 => held(InputAction::MoveRight),
        24..=35 => held(InputAction::MoveUp),
        36 => InputSnapshot::empty().with_interact_pressed(true),
        // Carry the cabbage over to the cutting board.
        37..=60 => held(InputAction::MoveRight),
        61..=70 => held(InputAction::MoveUp),
        71 => InputSnapshot::empty().with_interact_pressed(true),
        73 => InputSnapshot::empty().with_interact_alternate_pressed(true),
        75 => InputSnapshot::empty().with_interact_pressed(true),
        // Deliver the chopped cabbage to the counter on the far left.
        76..=147 => held(InputAction::MoveLeft),
        148..=157 => held(InputAction::MoveUp),
        158 => InputSnapshot::empty().with_interact_pressed(true),
        159 => InputSnapshot::empty().with_save_pressed(true),
        160.. => InputSnapshot::empty().with_quit_requested(true),
        _ => InputSnapshot::empty(),
    }
}
