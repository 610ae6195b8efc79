// ABOUTME: The evaluator — special forms, application protocol, quasiquote engine

use crate::env;
use crate::interpreter::Interpreter;
use crate::list;
use crate::value::{Callable, CallableKind, Obj, Origin, Ref};

impl Interpreter {
    /// Dispatch on the value variant, per spec 4.D.
    pub fn eval(&mut self, expr: Ref, env: Ref) -> Ref {
        match self.heap.get(expr).clone() {
            Obj::Symbol(name) => match crate::env::lookup(&self.heap, env, &name) {
                Some(v) => v,
                None => self.heap.new_nil(),
            },
            Obj::Cons { car, cdr } => {
                if let Obj::Symbol(name) = self.heap.get(car).clone() {
                    if let Some(result) = self.eval_special_form(&name, cdr, env) {
                        return result;
                    }
                }
                self.eval_application(expr, env)
            }
            // numbers, strings, bools, nil, errors, keywords, callables,
            // frames are all self-evaluating.
            _ => expr,
        }
    }

    fn eval_special_form(&mut self, name: &str, cdr: Ref, env: Ref) -> Option<Ref> {
        Some(match name {
            "quote" => self.sf_quote(cdr),
            "quasiquote" => self.sf_quasiquote(cdr, env),
            "eval" => self.sf_eval(cdr, env),
            "define" => self.sf_define(cdr, env),
            "set" => self.sf_set(cdr, env),
            "let" => self.sf_let(cdr, env),
            "if" => self.sf_if(cdr, env),
            "do" => self.sf_do(cdr, env),
            "lambda" => self.sf_lambda_or_macro(cdr, env, CallableKind::Function),
            "macro" => self.sf_lambda_or_macro(cdr, env, CallableKind::Macro),
            _ => return None,
        })
    }

    fn symbol_name(&mut self, r: Ref) -> Result<String, Ref> {
        match self.heap.get(r) {
            Obj::Symbol(s) => Ok(s.clone()),
            _ => Err(self
                .heap
                .new_error(format!("type error: expected a symbol, got {}", self.heap.print(r)))),
        }
    }

    // -- quote --

    fn sf_quote(&mut self, cdr: Ref) -> Ref {
        let (args, tail) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 1 || !matches!(self.heap.get(tail), Obj::Nil) {
            return self.heap.new_error("arity error: quote expects exactly 1 argument");
        }
        args[0]
    }

    // -- eval --

    fn sf_eval(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 1 {
            return self.heap.new_error("arity error: eval expects exactly 1 argument");
        }
        let evaluated_once = self.eval(args[0], env);
        self.eval(evaluated_once, env)
    }

    // -- define --

    fn sf_define(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 2 {
            return self.heap.new_error("arity error: define expects a name and a value");
        }
        let name = match self.symbol_name(args[0]) {
            Ok(n) => n,
            Err(e) => return e,
        };
        let value = self.eval(args[1], env);
        env::bind_root(&mut self.heap, env, &name, value);
        self.heap.new_nil()
    }

    // -- set --

    fn sf_set(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.is_empty() {
            return self.heap.new_error("arity error: set expects at least one binding");
        }
        if matches!(self.heap.get(args[0]), Obj::Cons { .. }) {
            for pair in &args {
                let (items, _) = list::list_to_vec(&self.heap, *pair);
                if items.len() != 2 {
                    return self
                        .heap
                        .new_error("syntax error: set pair must be (name value)");
                }
                let name = match self.symbol_name(items[0]) {
                    Ok(n) => n,
                    Err(e) => return e,
                };
                let value = self.eval(items[1], env);
                env::set_existing_or_local(&mut self.heap, env, &name, value);
            }
        } else {
            if args.len() != 2 {
                return self.heap.new_error("arity error: set expects a name and a value");
            }
            let name = match self.symbol_name(args[0]) {
                Ok(n) => n,
                Err(e) => return e,
            };
            let value = self.eval(args[1], env);
            env::set_existing_or_local(&mut self.heap, env, &name, value);
        }
        self.heap.new_nil()
    }

    // -- let --

    fn sf_let(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 2 {
            return self
                .heap
                .new_error("arity error: let expects a binding list and a body");
        }
        let (bindings, _) = list::list_to_vec(&self.heap, args[0]);
        if bindings.len() % 2 != 0 {
            return self
                .heap
                .new_error("syntax error: let bindings must alternate name and value");
        }
        let child = crate::env::new_frame(&mut self.heap, Some(env));
        let mut i = 0;
        while i < bindings.len() {
            let name = match self.symbol_name(bindings[i]) {
                Ok(n) => n,
                Err(e) => return e,
            };
            let value = self.eval(bindings[i + 1], env);
            env::bind(&mut self.heap, child, &name, value);
            i += 2;
        }
        self.eval(args[1], child)
    }

    // -- if --

    fn sf_if(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() < 2 || args.len() > 3 {
            return self
                .heap
                .new_error("arity error: if expects a condition, a then, and an optional else");
        }
        let cond = self.eval(args[0], env);
        if self.heap.is_truthy(cond) {
            self.eval(args[1], env)
        } else if args.len() == 3 {
            self.eval(args[2], env)
        } else {
            self.heap.new_nil()
        }
    }

    // -- do --

    fn sf_do(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        let mut result = self.heap.new_nil();
        for a in args {
            result = self.eval(a, env);
        }
        result
    }

    // -- lambda / macro --

    fn sf_lambda_or_macro(&mut self, cdr: Ref, env: Ref, kind: CallableKind) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 2 {
            return self
                .heap
                .new_error("arity error: lambda/macro expects a parameter list and a body");
        }
        let (params, rest_index) = self.parse_params(args[0]);
        let body = args[1];
        let captured = crate::env::new_frame(&mut self.heap, Some(env));
        match kind {
            CallableKind::Function => {
                self.heap
                    .new_user_function("lambda".to_string(), params, rest_index, body, captured)
            }
            CallableKind::Macro => {
                self.heap
                    .new_user_macro("macro".to_string(), params, rest_index, body, captured)
            }
        }
    }

    fn parse_params(&self, params_ref: Ref) -> (Vec<String>, Option<usize>) {
        let (items, _) = list::list_to_vec(&self.heap, params_ref);
        let mut names = Vec::with_capacity(items.len());
        let mut rest_index = None;
        for (i, item) in items.iter().enumerate() {
            let name = match self.heap.get(*item) {
                Obj::Symbol(s) => s.clone(),
                _ => String::new(),
            };
            if name == "&" {
                rest_index = Some(i);
            }
            names.push(name);
        }
        (names, rest_index)
    }

    // -- quasiquote engine --

    fn sf_quasiquote(&mut self, cdr: Ref, env: Ref) -> Ref {
        let (args, _) = list::list_to_vec(&self.heap, cdr);
        if args.len() != 1 {
            return self.heap.new_error("arity error: quasiquote expects exactly 1 argument");
        }
        let copy = self.heap.deep_copy(args[0]);
        let rewritten = self.qq_rewrite(copy, env);
        self.qq_synthesize(rewritten, env)
    }

    /// Replace every cons whose car is the symbol `unquote` with the
    /// evaluation of its argument, mutating the (already-copied) spine in
    /// place (spec 9's design note on in-place quasiquote).
    fn qq_rewrite(&mut self, node: Ref, env: Ref) -> Ref {
        let (car, cdr) = match self.heap.get(node) {
            Obj::Cons { car, cdr } => (*car, *cdr),
            _ => return node,
        };
        if let Obj::Symbol(s) = self.heap.get(car) {
            if s == "unquote" {
                let (args, _) = list::list_to_vec(&self.heap, cdr);
                if args.len() != 1 {
                    return self.heap.new_error("syntax error: unquote expects exactly 1 argument");
                }
                return self.eval(args[0], env);
            }
        }
        let new_car = self.qq_rewrite(car, env);
        let new_cdr = self.qq_rewrite(cdr, env);
        if let Obj::Cons { car: c, cdr: d } = self.heap.get_mut(node) {
            *c = new_car;
            *d = new_cdr;
        }
        node
    }

    /// Wrap each top-level element of the rewritten template in
    /// `(list (quote x))` and fold with `append`, then evaluate the
    /// synthetic form (spec 4.D) so user redefinitions of `list`/`append`
    /// are honoured.
    fn qq_synthesize(&mut self, rewritten: Ref, env: Ref) -> Ref {
        if !matches!(self.heap.get(rewritten), Obj::Cons { .. } | Obj::Nil) {
            return rewritten;
        }
        let (items, tail) = list::list_to_vec(&self.heap, rewritten);
        let list_sym = self.heap.new_symbol("list");
        let append_sym = self.heap.new_symbol("append");
        let quote_sym = self.heap.new_symbol("quote");
        let nil = self.heap.new_nil();

        let mut call_args = Vec::with_capacity(items.len() + 1);
        for item in items {
            let quoted_tail = self.heap.new_cons(item, nil);
            let quoted = self.heap.new_cons(quote_sym, quoted_tail);
            let list_call_tail = self.heap.new_cons(quoted, nil);
            call_args.push(self.heap.new_cons(list_sym, list_call_tail));
        }
        if !matches!(self.heap.get(tail), Obj::Nil) {
            let quoted_tail = self.heap.new_cons(tail, nil);
            call_args.push(self.heap.new_cons(quote_sym, quoted_tail));
        }
        let synthetic_args = list::vec_to_list(&mut self.heap, &call_args, nil);
        let synthetic = self.heap.new_cons(append_sym, synthetic_args);
        self.eval(synthetic, env)
    }

    // -- application protocol --

    fn eval_application(&mut self, expr: Ref, env: Ref) -> Ref {
        let (items, _) = list::list_to_vec(&self.heap, expr);
        if items.is_empty() {
            return self.heap.new_error("syntax error: empty application");
        }
        let f = self.eval(items[0], env);
        if matches!(self.heap.get(f), Obj::Nil) {
            let name = self.heap.print(items[0]);
            return self
                .heap
                .new_error(format!("name error: function '{name}' is undefined"));
        }
        let callable = match self.heap.get(f) {
            Obj::Callable(c) => c.clone(),
            _ => {
                return self
                    .heap
                    .new_error(format!("type error: '{}' is not callable", self.heap.print(f)))
            }
        };
        let raw_args = &items[1..];
        let is_macro = callable.kind == CallableKind::Macro;
        let arg_refs: Vec<Ref> = if is_macro {
            raw_args.to_vec()
        } else {
            raw_args.iter().map(|&a| self.eval(a, env)).collect()
        };
        let result = self.apply_callable(&callable, arg_refs);
        if is_macro {
            self.eval(result, env)
        } else {
            result
        }
    }

    /// Bind `arg_refs` to `callable`'s parameters (collecting the rest
    /// parameter, if any, per spec invariant 3) and run its body, or
    /// invoke its Rust function pointer directly for a builtin. Shared by
    /// ordinary application, `apply`, and the `macroexpand`/`macroexpand-1`
    /// builtins, none of which re-evaluate the result themselves.
    pub fn apply_callable(&mut self, callable: &Callable, mut arg_refs: Vec<Ref>) -> Ref {
        match &callable.origin {
            Origin::Builtin(func) => func(self, &arg_refs),
            Origin::UserDefined => {
                let params = callable.params.clone().unwrap_or_default();
                let body = callable.body.expect("user-defined callable has a body");
                let captured_env = callable
                    .captured_env
                    .expect("user-defined callable has a captured env");
                let rest_idx = callable.rest_index;
                let call_frame = crate::env::new_frame(&mut self.heap, Some(captured_env));
                for (i, pname) in params.iter().enumerate() {
                    let value = if Some(i) == rest_idx {
                        let rest_items: Vec<Ref> =
                            if arg_refs.len() > i { arg_refs.split_off(i) } else { Vec::new() };
                        let nil = self.heap.new_nil();
                        list::vec_to_list(&mut self.heap, &rest_items, nil)
                    } else if rest_idx.is_some_and(|ri| i > ri) {
                        self.heap.new_nil()
                    } else {
                        arg_refs.get(i).copied().unwrap_or_else(|| self.heap.new_nil())
                    };
                    env::bind(&mut self.heap, call_frame, pname, value);
                }
                self.eval(body, call_frame)
            }
        }
    }
}
