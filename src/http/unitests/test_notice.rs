use std::sync::{Arc, Mutex};
use crate::Error;
use crate::http::notice::{self, Notice, NoticeLevel, NoticeListener, Notifier};

struct Collector(Arc<Mutex<Vec<Notice>>>);
impl NoticeListener for Collector {
    fn on_notice(&self, notice: &Notice) {
        self.0.lock().unwrap().push(notice.clone());
    }
}

#[test]
fn test_notifier_fans_out() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let notifier = Notifier::new();
    notifier.add_listener(Collector(first.clone()));
    notifier.add_listener(Collector(second.clone()));

    notifier.success("Criado com sucesso!");
    notifier.error("Recurso não encontrado.");

    for seen in [first, second] {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].level(), NoticeLevel::Success);
        assert_eq!(seen[0].message(), "Criado com sucesso!");
        assert_eq!(seen[1].level(), NoticeLevel::Error);
        assert_eq!(seen[1].to_string(), "[ERROR] Recurso não encontrado.");
    }
}

#[test]
fn test_error_notice_by_status() {
    assert_eq!(notice::error_notice(&Error::Http(401, Some("x".into()))), notice::MSG_SESSION_EXPIRED);
    assert_eq!(notice::error_notice(&Error::Http(403, None)), notice::MSG_FORBIDDEN);
    assert_eq!(notice::error_notice(&Error::Http(404, None)), notice::MSG_NOT_FOUND);
    assert_eq!(notice::error_notice(&Error::Http(500, None)), notice::MSG_SERVER_ERROR);
    assert_eq!(notice::error_notice(&Error::Http(400, None)), notice::MSG_GENERIC_ERROR);
    assert_eq!(
        notice::error_notice(&Error::Http(409, Some("Já existe um contato com este celular.".into()))),
        "Já existe um contato com este celular."
    );
    assert_eq!(notice::error_notice(&Error::Network("refused".into())), notice::MSG_NO_RESPONSE);
    assert_eq!(notice::error_notice(&Error::Request("bad".into())), notice::MSG_BAD_REQUEST);
}
