/// generates a `Context` extension trait bound to the given error type.
///
/// each crate that wants to attach context messages to foreign errors
/// invokes this once with its own error type and then implements the trait
/// for `Result` / `Option`.
#[macro_export]
macro_rules! context_trait {
    ($e:path) => {
        pub trait Context<T, E> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>;
        }
    };
}
