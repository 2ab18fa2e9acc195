pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::interface::UserInterface;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Captures printed output so tests may inspect it.
    /// Cloning shares the same buffers, so one handle can be given away while the test keeps the other.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryInterface {
        message: Rc<RefCell<Vec<String>>>,
        error: Rc<RefCell<Vec<String>>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.message.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.error.borrow_mut().push(message);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>) {
            let InMemoryInterface { message, error } = self;
            let message = join(&message.borrow());
            let error = join(&error.borrow());
            (message, error)
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, None);
            message.expect("nothing was printed")
        }
    }

    fn join(lines: &[String]) -> Option<String> {
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}
