use super::user::User;

pub trait SessionListener: Send + Sync {
    fn on_code_sent(&self, _email: &str) {}
    fn on_authenticated(&self, _user: &User) {}
    fn on_logged_out(&self) {}
}
