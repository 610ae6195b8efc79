// ABOUTME: Type reflection builtin — (type x) names a value's runtime variant

use super::util::arity_error;
use crate::interpreter::Interpreter;
use crate::value::Ref;

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("type", type_of);
}

fn type_of(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "type", "1 argument", args.len());
    }
    let name = interp.heap.get(args[0]).type_name();
    interp.heap.new_string(name.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use crate::interpreter::Interpreter;

    #[test]
    fn type_names_every_observable_variant() {
        let mut interp = Interpreter::new();
        let cases = [
            ("(type 1)", "number"),
            ("(type \"x\")", "string"),
            ("(type 'x)", "symbol"),
            ("(type true)", "bool"),
            ("(type nil)", "nil"),
            ("(type (cons 1 2))", "cons"),
            ("(type (error \"boom\"))", "error"),
        ];
        for (src, want) in cases {
            let r = interp.read_eval(src);
            assert_eq!(interp.heap.print(*r.last().unwrap()), want, "for {src}");
        }
    }

    #[test]
    fn quote_with_too_many_args_types_as_error() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(type (quote a b c))");
        assert_eq!(interp.heap.print(*r.last().unwrap()), "error");
    }
}
