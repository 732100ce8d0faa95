/// Single source of truth for all commands
/// This macro takes a wrapper macro path and applies it to the command list
#[macro_export]
macro_rules! with_commands {
    ($($wrapper:tt)*) => {
        $($wrapper)*![
            // Progress
            $crate::commands::load_progress,
            $crate::commands::update_progress,
            // Cake page
            $crate::commands::enter_cake,
            $crate::commands::leave_cake,
            $crate::commands::cake_tap,
            $crate::commands::cake_touch_start,
            $crate::commands::cake_touch_end,
            $crate::commands::cake_pointer_move,
            // Gift quiz
            $crate::commands::submit_gift_answer,
        ]
    };
}
