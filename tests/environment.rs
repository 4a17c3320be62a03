#[cfg(test)]
mod environment_tests {
    use std::rc::Rc;

    use treelox as lox;

    use lox::environment::{EnvRef, Environment};
    use lox::token::{Token, TokenType};
    use lox::value::Value;
    use pretty_assertions::assert_eq;

    fn name(lexeme: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, lexeme, 1)
    }

    /// globals <- middle <- inner
    fn chain() -> (EnvRef, EnvRef, EnvRef) {
        let globals = Environment::new().into_ref();
        let middle = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        let inner = Environment::with_enclosing(Rc::clone(&middle)).into_ref();
        (globals, middle, inner)
    }

    #[test]
    fn test_get_walks_outward() {
        let (globals, _, inner) = chain();
        globals.borrow_mut().define("x", Value::from(1.0));

        assert_eq!(inner.borrow().get(&name("x")).unwrap(), Value::from(1.0));
    }

    #[test]
    fn test_define_shadows_and_redefines() {
        let (globals, _, inner) = chain();
        globals.borrow_mut().define("x", Value::from("outer"));
        inner.borrow_mut().define("x", Value::from("inner"));
        inner.borrow_mut().define("x", Value::from("again"));

        assert_eq!(inner.borrow().get(&name("x")).unwrap(), Value::from("again"));
        assert_eq!(globals.borrow().get(&name("x")).unwrap(), Value::from("outer"));
    }

    #[test]
    fn test_assign_updates_nearest_binding_only() {
        let (globals, middle, inner) = chain();
        globals.borrow_mut().define("x", Value::from(1.0));
        middle.borrow_mut().define("x", Value::from(2.0));

        inner.borrow_mut().assign(&name("x"), Value::from(3.0)).unwrap();

        assert_eq!(middle.borrow().get(&name("x")).unwrap(), Value::from(3.0));
        assert_eq!(globals.borrow().get(&name("x")).unwrap(), Value::from(1.0));
    }

    #[test]
    fn test_assign_never_declares() {
        let (globals, _, inner) = chain();

        let err = inner.borrow_mut().assign(&name("y"), Value::Nil).unwrap_err();

        assert_eq!(err.message, "Undefined variable 'y'.");
        assert!(globals.borrow().get(&name("y")).is_err());
    }

    #[test]
    fn test_ancestor() {
        let (globals, middle, inner) = chain();

        assert!(Rc::ptr_eq(&Environment::ancestor(&inner, 0).unwrap(), &inner));
        assert!(Rc::ptr_eq(&Environment::ancestor(&inner, 1).unwrap(), &middle));
        assert!(Rc::ptr_eq(&Environment::ancestor(&inner, 2).unwrap(), &globals));
        assert!(Environment::ancestor(&inner, 3).is_none());
    }

    #[test]
    fn test_get_at_looks_only_at_one_scope() {
        let (globals, middle, inner) = chain();
        globals.borrow_mut().define("x", Value::from("global"));
        middle.borrow_mut().define("y", Value::from("middle"));

        assert_eq!(
            Environment::get_at(&inner, 1, &name("y")).unwrap(),
            Value::from("middle")
        );

        // present further out, but not at the resolved distance
        assert!(Environment::get_at(&inner, 1, &name("x")).is_err());
        assert!(Environment::get_at(&inner, 7, &name("x")).is_err());
    }

    #[test]
    fn test_assign_at_writes_resolved_scope() {
        let (_, middle, inner) = chain();
        middle.borrow_mut().define("v", Value::from(1.0));
        inner.borrow_mut().define("v", Value::from(10.0));

        Environment::assign_at(&inner, 1, &name("v"), Value::from(2.0)).unwrap();

        assert_eq!(middle.borrow().get(&name("v")).unwrap(), Value::from(2.0));
        assert_eq!(inner.borrow().get(&name("v")).unwrap(), Value::from(10.0));
        assert!(Environment::assign_at(&inner, 0, &name("w"), Value::Nil).is_err());
    }

    #[test]
    fn test_shared_mutation_is_visible_to_every_holder() {
        let (globals, _, _) = chain();
        let first = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        let second = Environment::with_enclosing(Rc::clone(&globals)).into_ref();

        globals.borrow_mut().define("n", Value::from(0.0));
        first.borrow_mut().assign(&name("n"), Value::from(5.0)).unwrap();

        assert_eq!(second.borrow().get(&name("n")).unwrap(), Value::from(5.0));
    }
}
