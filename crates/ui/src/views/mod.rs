mod admin;
mod home;
mod leaderboard;
mod login;
mod play;
mod signup;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use home::HomeView;
pub use leaderboard::LeaderboardView;
pub use login::LoginView;
pub use play::PlayView;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};
