//! Chat-specific UI fragments.
//!
//! Everything the chat page is made of: the shell layout, answer rendering,
//! example prompts, the machine selector and the small supporting widgets.

mod analysis;
mod answer;
mod clear_chat;
mod example;
mod input_area;
mod loading_overlay;
mod machine_select;
mod message_list;
mod shell;

pub use analysis::{AnalysisTab, analysis_panel};
pub use answer::AnswerRenderer;
pub use clear_chat::clear_chat_button;
pub use example::{example, example_list};
pub use input_area::input_area;
pub use loading_overlay::{AUTO_HIDE_MS, loading_overlay};
pub use machine_select::machine_select;
pub use message_list::{message_list, pending_answer, turn_fragment, user_message};
pub use shell::{chat_shell, chat_shell_for_session};
