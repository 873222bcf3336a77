//! Renders the code IR as Go source text.

use super::ast::{Expr, Field, Function, Stmt};

/// Pretty printer for the code IR. Uses tabs for indentation, the way
/// `gofmt` does, and puts every struct field and slice element on its own
/// line.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    /// Prints the given function, consuming the printer.
    pub fn function(mut self, function: &Function) -> String {
        self.out.push_str("func ");
        self.out.push_str(function.name.as_str());
        self.out.push_str("() ");
        self.out.push_str(function.result);
        self.out.push_str(" {\n");
        self.indent += 1;
        for stmt in &function.body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.out.push_str("}\n");
        self.out
    }

    /// Prints a single expression at the top level.
    pub fn expr_to_string(mut self, expr: &Expr) -> String {
        self.expr(expr);
        self.out
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Blank => {}
            Stmt::Define(name, value) => {
                self.tabs();
                self.out.push_str(name.as_str());
                self.out.push_str(" := ");
                self.expr(value);
            }
            Stmt::Return(value) => {
                self.tabs();
                self.out.push_str("return ");
                self.expr(value);
            }
        }
        self.out.push('\n');
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Str(s) => self.out.push_str(&quote(s)),
            Expr::Int(i) => self.out.push_str(&i.to_string()),
            Expr::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Expr::Symbol(s) => self.out.push_str(s),
            Expr::Local(ident) => self.out.push_str(ident.as_str()),
            Expr::Call(func, args) => {
                self.out.push_str(func);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
            Expr::AddrOf(inner) => {
                self.out.push('&');
                self.expr(inner);
            }
            Expr::Struct(ty, fields) => {
                if let Some(ty) = ty {
                    self.out.push_str(ty);
                }
                self.fields(fields);
            }
            Expr::List(elem_ty, items) => {
                self.out.push_str("[]");
                self.out.push_str(elem_ty);
                self.items(items);
            }
        }
    }

    fn fields(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for field in fields {
            self.tabs();
            self.out.push_str(field.name);
            self.out.push_str(": ");
            self.expr(&field.value);
            self.out.push_str(",\n");
        }
        self.indent -= 1;
        self.tabs();
        self.out.push('}');
    }

    fn items(&mut self, items: &[Expr]) {
        if items.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for item in items {
            self.tabs();
            self.expr(item);
            self.out.push_str(",\n");
        }
        self.indent -= 1;
        self.tabs();
        self.out.push('}');
    }

    fn tabs(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }
}

/// Quotes a string as a Go interpreted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32))
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
