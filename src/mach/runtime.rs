use super::{Address, Builtin, Config, Function, InputPolicy, Operation, Program, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{Datum, Expression, PrintItem, Statement, Variable};
use crate::lang::{Error, LineNumber};
use log::{debug, trace};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const MAX_FN_DEPTH: usize = 100;

/// What the host must do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out; call `execute` again.
    Running,
    /// Text to display.
    Print(String),
    /// Show the prompt, then hand one line to `input` before resuming.
    Input(String),
    Stopped(Termination),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    End,
    Break(LineNumber),
    Error(Error),
}

enum Flow {
    Next,
    Jump(Address),
    Input(String),
    End,
    Stop,
}

#[derive(Debug, Clone)]
struct ForFrame {
    var: Rc<str>,
    to: f64,
    step: f64,
    resume: Address,
}

/// ## Execution session
///
/// Owns every piece of mutable state for one run of one program:
/// variables, both control stacks and the instruction pointer.
/// Nothing is shared between sessions.

#[derive(Debug)]
pub struct Runtime {
    program: Rc<Program>,
    config: Config,
    pc: Address,
    var: Var,
    gosub: Stack<Address>,
    fors: Stack<ForFrame>,
    functions: HashMap<Rc<str>, Address>,
    function: Function,
    fn_depth: usize,
    data_pos: usize,
    print_col: usize,
    output: String,
    input: Option<String>,
    interrupted: bool,
    finished: Option<Termination>,
}

impl Runtime {
    pub fn new(program: Program, config: Config) -> Runtime {
        debug!(
            "new session: {} lines, input policy {:?}, stack limit {}",
            program.len(),
            config.input_policy,
            config.stack_limit
        );
        Runtime {
            program: Rc::new(program),
            pc: Address::default(),
            var: Var::new(),
            gosub: Stack::new("GOSUB STACK OVERFLOW", config.stack_limit),
            fors: Stack::new("FOR STACK OVERFLOW", config.stack_limit),
            functions: HashMap::new(),
            function: Function::new(config.seed),
            fn_depth: 0,
            data_pos: 0,
            print_col: 0,
            output: String::new(),
            input: None,
            interrupted: false,
            finished: None,
            config,
        }
    }

    /// Parses source text and opens a session for it.
    pub fn load(source: &str, config: Config) -> Result<Runtime> {
        Ok(Runtime::new(Program::load(source)?, config))
    }

    /// Runs up to `cycles` statements. Pending output is always
    /// delivered before any other event.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if !self.output.is_empty() {
            return Event::Print(std::mem::take(&mut self.output));
        }
        if let Some(termination) = &self.finished {
            return Event::Stopped(termination.clone());
        }
        for _ in 0..cycles {
            if self.interrupted {
                self.interrupted = false;
                let line = self.line_number();
                return self.finish(Termination::Break(line));
            }
            match self.step() {
                Ok(Flow::Next) => self.pc = self.pc.next(),
                Ok(Flow::Jump(addr)) => self.pc = addr,
                Ok(Flow::Input(prompt)) => return Event::Input(prompt),
                Ok(Flow::End) => return self.finish(Termination::End),
                Ok(Flow::Stop) => {
                    let line = self.line_number();
                    return self.finish(Termination::Break(line));
                }
                Err(error) => {
                    let error = error.in_line_number(self.line_number());
                    return self.finish(Termination::Error(error));
                }
            }
            if !self.output.is_empty() {
                return Event::Print(std::mem::take(&mut self.output));
            }
        }
        Event::Running
    }

    /// Supplies the reply to the last `Event::Input`.
    pub fn input(&mut self, line: &str) {
        self.input = Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string());
    }

    /// Stops the run before the next statement, reported as a break.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn variable(&self, name: &str) -> Val {
        self.var.fetch(&name.to_ascii_uppercase().into())
    }

    pub fn gosub_depth(&self) -> usize {
        self.gosub.len()
    }

    pub fn for_depth(&self) -> usize {
        self.fors.len()
    }

    pub fn instruction_pointer(&self) -> Address {
        self.pc
    }

    pub fn line_number(&self) -> LineNumber {
        self.program.line_number(self.pc)
    }

    pub fn termination(&self) -> Option<&Termination> {
        self.finished.as_ref()
    }

    fn finish(&mut self, termination: Termination) -> Event {
        debug!("session finished: {:?}", termination);
        self.gosub.clear();
        self.fors.clear();
        self.finished = Some(termination.clone());
        if self.output.is_empty() {
            Event::Stopped(termination)
        } else {
            Event::Print(std::mem::take(&mut self.output))
        }
    }

    fn step(&mut self) -> Result<Flow> {
        let program = Rc::clone(&self.program);
        let (addr, statement) = match program.statement(self.pc) {
            Some(found) => found,
            None => return Ok(Flow::End),
        };
        self.pc = addr;
        if log::log_enabled!(log::Level::Trace) {
            trace!("{} {:?}", self.line_number().unwrap_or_default(), statement);
        }
        self.statement(addr, statement)
    }

    fn statement(&mut self, addr: Address, statement: &Statement) -> Result<Flow> {
        match statement {
            Statement::Clear(_) => {
                self.var.clear();
                self.functions.clear();
                self.data_pos = 0;
            }
            Statement::Data(..) | Statement::Rem(_) => {}
            Statement::Def(_, ident, _, _) => {
                self.functions.insert(ident.name().clone(), addr);
            }
            Statement::Dim(_, vars) => {
                for var in vars {
                    if let Variable::Array(_, ident, dims) = var {
                        let dims = self.eval_list(dims)?;
                        self.var.dimension_array(ident.name(), dims)?;
                    }
                }
            }
            Statement::Else(_, end) => return Ok(Flow::Jump(Self::offset(addr, *end))),
            Statement::End(_) => return Ok(Flow::End),
            Statement::For(_, ident, from, to, step) => {
                return self.r#for(addr, ident.name(), from, to, step.as_ref())
            }
            Statement::Gosub(_, number) => {
                let target = self.find_line(*number)?;
                self.gosub.push(addr.next())?;
                return Ok(Flow::Jump(target));
            }
            Statement::Goto(_, number) => return Ok(Flow::Jump(self.find_line(*number)?)),
            Statement::If(_, predicate, target) => {
                if !self.eval(predicate)?.is_true() {
                    return Ok(Flow::Jump(Self::offset(addr, *target)));
                }
            }
            Statement::Input(_, prompt, vars) => {
                return self.input_statement(addr, prompt, vars)
            }
            Statement::Let(_, var, expr) => {
                let val = self.eval(expr)?;
                self.assign(var, val)?;
            }
            Statement::Next(_, ident) => return self.r#next(ident.as_ref().map(|i| i.name())),
            Statement::OnGoto(_, expr, numbers) => {
                if let Some(number) = self.select(expr, numbers)? {
                    return Ok(Flow::Jump(self.find_line(number)?));
                }
            }
            Statement::OnGosub(_, expr, numbers) => {
                if let Some(number) = self.select(expr, numbers)? {
                    let target = self.find_line(number)?;
                    self.gosub.push(addr.next())?;
                    return Ok(Flow::Jump(target));
                }
            }
            Statement::Print(_, items) => self.r#print(items)?,
            Statement::Read(_, vars) => self.r#read(vars)?,
            Statement::Restore(_, number) => {
                self.data_pos = match number {
                    Some(number) => {
                        self.find_line(*number)?;
                        self.program.data_position(*number)
                    }
                    None => 0,
                }
            }
            Statement::Return(_) => match self.gosub.pop() {
                Some(addr) => return Ok(Flow::Jump(addr)),
                None => return Err(error!(ReturnWithoutGosub)),
            },
            Statement::Stop(_) => return Ok(Flow::Stop),
        }
        Ok(Flow::Next)
    }

    fn offset(addr: Address, offset: usize) -> Address {
        Address {
            line: addr.line,
            offset,
        }
    }

    fn find_line(&self, number: u16) -> Result<Address> {
        match self.program.find_line(number) {
            Some(addr) => Ok(addr),
            None => Err(error!(UndefinedLine; &number.to_string())),
        }
    }

    fn r#for(
        &mut self,
        addr: Address,
        var: &Rc<str>,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<Flow> {
        let from = self.eval(from)?;
        self.var.store(var, from.clone())?;
        let from = f64::try_from(from)?;
        let to = f64::try_from(self.eval(to)?)?;
        let step = match step {
            Some(step) => f64::try_from(self.eval(step)?)?,
            None => 1.0,
        };
        if step == 0.0 {
            return Err(error!(IllegalFunctionCall; "FOR STEP 0"));
        }
        if let Some(index) = self.fors.rposition(|frame| frame.var == *var) {
            self.fors.truncate(index);
        }
        let skip = if step > 0.0 { from > to } else { from < to };
        if skip {
            return self.skip_loop(addr, var);
        }
        self.fors.push(ForFrame {
            var: var.clone(),
            to,
            step,
            resume: addr.next(),
        })?;
        Ok(Flow::Next)
    }

    /// Moves past the NEXT that closes a loop whose body never runs.
    /// A NEXT naming an enclosing loop at the same depth is executed
    /// instead so that loop can continue.
    fn skip_loop(&self, addr: Address, var: &Rc<str>) -> Result<Flow> {
        let mut depth: usize = 0;
        let mut cursor = addr.next();
        while let Some((at, statement)) = self.program.statement(cursor) {
            match statement {
                Statement::For(..) => depth += 1,
                Statement::Next(_, ident) if depth == 0 => {
                    return match ident {
                        Some(ident) if ident.name() != var => Ok(Flow::Jump(at)),
                        _ => Ok(Flow::Jump(at.next())),
                    };
                }
                Statement::Next(..) => depth -= 1,
                _ => {}
            }
            cursor = at.next();
        }
        Err(error!(ForWithoutNext; var))
    }

    /// An unnamed NEXT closes the innermost loop. A named NEXT closes
    /// the loop of that variable and abandons any loops nested inside it.
    fn r#next(&mut self, var: Option<&Rc<str>>) -> Result<Flow> {
        let index = match var {
            Some(var) => self.fors.rposition(|frame| frame.var == *var),
            None => self.fors.len().checked_sub(1),
        };
        let index = match index {
            Some(index) => index,
            None => {
                return Err(match var {
                    Some(var) => error!(NextWithoutFor; var),
                    None => error!(NextWithoutFor),
                })
            }
        };
        self.fors.truncate(index + 1);
        let frame = match self.fors.last() {
            Some(frame) => frame.clone(),
            None => return Err(error!(InternalError; "FOR STACK")),
        };
        let value = f64::try_from(self.var.fetch(&frame.var))? + frame.step;
        self.var.store(&frame.var, Val::Number(value))?;
        let more = if frame.step > 0.0 {
            value <= frame.to
        } else {
            value >= frame.to
        };
        if more {
            Ok(Flow::Jump(frame.resume))
        } else {
            self.fors.pop();
            Ok(Flow::Next)
        }
    }

    fn select(&mut self, expr: &Expression, numbers: &[u16]) -> Result<Option<u16>> {
        let n = f64::try_from(self.eval(expr)?)?.trunc();
        if !(0.0..=255.0).contains(&n) {
            return Err(error!(IllegalFunctionCall; "ON INDEX"));
        }
        let n = n as usize;
        if n == 0 {
            return Ok(None);
        }
        Ok(numbers.get(n - 1).copied())
    }

    fn r#print(&mut self, items: &[PrintItem]) -> Result<()> {
        let mut newline = true;
        for item in items {
            newline = true;
            match item {
                PrintItem::Comma(_) => {
                    let zone = self.config.print_zone.max(1);
                    let pad = zone - self.print_col % zone;
                    self.write(&" ".repeat(pad));
                    newline = false;
                }
                PrintItem::Semicolon(_) => newline = false,
                PrintItem::Expression(Expression::Call(_, ident, args))
                    if &**ident.name() == "TAB" && args.len() == 1 =>
                {
                    let n = f64::try_from(self.eval(&args[0])?)?.trunc();
                    if !(1.0..=255.0).contains(&n) {
                        return Err(error!(IllegalFunctionCall; "TAB"));
                    }
                    let column = n as usize - 1;
                    if self.print_col > column {
                        self.write("\n");
                    }
                    let pad = column - self.print_col;
                    self.write(&" ".repeat(pad));
                }
                PrintItem::Expression(expr) => {
                    let val = self.eval(expr)?;
                    self.write(&val.to_string());
                }
            }
        }
        if newline {
            self.write("\n");
        }
        Ok(())
    }

    fn write(&mut self, s: &str) {
        for ch in s.chars() {
            if ch == '\n' {
                self.print_col = 0;
            } else {
                self.print_col += 1;
            }
        }
        self.output.push_str(s);
    }

    fn input_statement(
        &mut self,
        addr: Address,
        prompt: &Rc<str>,
        vars: &[Variable],
    ) -> Result<Flow> {
        let line = match self.input.take() {
            Some(line) => line,
            None => return Ok(Flow::Input(prompt.to_string())),
        };
        self.print_col = 0;
        let fields = split_fields(&line);
        if fields.len() < vars.len() {
            return self.redo(addr, error!(InputPastEnd; "TOO FEW VALUES"));
        }
        let mut vals: Vec<Val> = vec![];
        for (var, field) in vars.iter().zip(&fields) {
            if var.ident().is_string() {
                vals.push(Val::String(field.text.as_str().into()));
                continue;
            }
            match parse_number(&field.text) {
                Some(n) if !field.quoted => vals.push(Val::Number(n)),
                _ => {
                    let message = format!("{} IS NOT A NUMBER", field.text);
                    return self.redo(addr, error!(TypeMismatch; &message));
                }
            }
        }
        for (var, val) in vars.iter().zip(vals) {
            self.assign(var, val)?;
        }
        if fields.len() > vars.len() {
            self.write("?EXTRA IGNORED\n");
        }
        Ok(Flow::Next)
    }

    fn redo(&mut self, addr: Address, error: Error) -> Result<Flow> {
        match self.config.input_policy {
            InputPolicy::Redo => {
                self.write("?REDO FROM START\n");
                Ok(Flow::Jump(addr))
            }
            InputPolicy::Fail => Err(error),
        }
    }

    fn r#read(&mut self, vars: &[Variable]) -> Result<()> {
        let program = Rc::clone(&self.program);
        for var in vars {
            let datum = match program.data().get(self.data_pos) {
                Some(datum) => datum,
                None => return Err(error!(OutOfData)),
            };
            self.data_pos += 1;
            let val = match datum {
                Datum::Quoted(s) | Datum::Unquoted(s) if var.ident().is_string() => {
                    Val::String(s.clone())
                }
                Datum::Unquoted(s) => match parse_number(s) {
                    Some(n) => Val::Number(n),
                    None => return Err(error!(TypeMismatch; &format!("DATA {}", s))),
                },
                Datum::Quoted(s) => return Err(error!(TypeMismatch; &format!("DATA \"{}\"", s))),
            };
            self.assign(var, val)?;
        }
        Ok(())
    }

    fn assign(&mut self, var: &Variable, val: Val) -> Result<()> {
        match var {
            Variable::Unary(_, ident) => self.var.store(ident.name(), val),
            Variable::Array(_, ident, indices) => {
                let indices = self.eval_list(indices)?;
                self.var.store_array(ident.name(), indices, val)
            }
        }
    }

    fn eval_list(&mut self, exprs: &[Expression]) -> Result<Vec<Val>> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }

    fn eval(&mut self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Number(_, n) => Ok(Val::Number(*n)),
            Expression::String(_, s) => Ok(Val::String(s.clone())),
            Expression::Var(_, ident) => match Builtin::from_name(ident.name()) {
                Some(builtin) if builtin.arity().contains(&0) => {
                    self.function.call(builtin, vec![])
                }
                _ => Ok(self.var.fetch(ident.name())),
            },
            Expression::Call(_, ident, args) => {
                let args = self.eval_list(args)?;
                match Builtin::from_name(ident.name()) {
                    Some(builtin) => self.function.call(builtin, args),
                    None => self.var.fetch_array(ident.name(), args),
                }
            }
            Expression::UserFn(_, ident, args) => {
                let args = self.eval_list(args)?;
                self.call_user_fn(ident.name(), args)
            }
            Expression::Negation(_, expr) => Operation::negate(self.eval(expr)?),
            Expression::Not(_, expr) => Operation::not(self.eval(expr)?),
            Expression::Power(_, lhs, rhs) => self.binary(lhs, rhs, Operation::power),
            Expression::Multiply(_, lhs, rhs) => self.binary(lhs, rhs, Operation::multiply),
            Expression::Divide(_, lhs, rhs) => self.binary(lhs, rhs, Operation::divide),
            Expression::Add(_, lhs, rhs) => self.binary(lhs, rhs, Operation::sum),
            Expression::Subtract(_, lhs, rhs) => self.binary(lhs, rhs, Operation::subtract),
            Expression::Equal(_, lhs, rhs) => self.binary(lhs, rhs, Operation::equal),
            Expression::NotEqual(_, lhs, rhs) => self.binary(lhs, rhs, Operation::not_equal),
            Expression::Less(_, lhs, rhs) => self.binary(lhs, rhs, Operation::less),
            Expression::LessEqual(_, lhs, rhs) => self.binary(lhs, rhs, Operation::less_equal),
            Expression::Greater(_, lhs, rhs) => self.binary(lhs, rhs, Operation::greater),
            Expression::GreaterEqual(_, lhs, rhs) => self.binary(lhs, rhs, Operation::greater_equal),
            Expression::And(_, lhs, rhs) => self.binary(lhs, rhs, Operation::and),
            Expression::Or(_, lhs, rhs) => self.binary(lhs, rhs, Operation::or),
        }
    }

    fn binary(
        &mut self,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        op(lhs, rhs)
    }

    /// Parameters shadow variables of the same name for the duration
    /// of the call.
    fn call_user_fn(&mut self, name: &Rc<str>, args: Vec<Val>) -> Result<Val> {
        let addr = match self.functions.get(name) {
            Some(addr) => *addr,
            None => return Err(error!(UndefinedUserFunction; name)),
        };
        let program = Rc::clone(&self.program);
        let (params, body) = match program.statement(addr) {
            Some((_, Statement::Def(_, _, params, body))) => (params, body),
            _ => return Err(error!(InternalError; "DEF FN")),
        };
        if params.len() != args.len() {
            return Err(error!(IllegalFunctionCall;
                &format!("{} TAKES {} ARGUMENT(S)", name, params.len())));
        }
        for (param, arg) in params.iter().zip(&args) {
            arg.check_type(param.name())?;
        }
        if self.fn_depth >= MAX_FN_DEPTH {
            return Err(error!(OutOfMemory; "FN NESTING TOO DEEP"));
        }
        let saved: Vec<Val> = params.iter().map(|p| self.var.fetch(p.name())).collect();
        for (param, arg) in params.iter().zip(args) {
            self.var.store(param.name(), arg)?;
        }
        self.fn_depth += 1;
        let result = self.eval(body);
        self.fn_depth -= 1;
        for (param, val) in params.iter().zip(saved) {
            self.var.store(param.name(), val)?;
        }
        let result = result?;
        result.check_type(name)?;
        Ok(result)
    }
}

struct Field {
    text: String,
    quoted: bool,
}

/// Splits an INPUT reply on commas. Quoted fields keep their blanks
/// and may contain commas.
fn split_fields(line: &str) -> Vec<Field> {
    let mut fields: Vec<Field> = vec![];
    let mut chars = line.chars().peekable();
    loop {
        while let Some(' ') | Some('\t') = chars.peek() {
            chars.next();
        }
        let mut text = String::new();
        let mut quoted = false;
        if let Some('"') = chars.peek() {
            chars.next();
            quoted = true;
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                text.push(ch);
            }
            for ch in chars.by_ref() {
                if ch == ',' {
                    break;
                }
            }
            fields.push(Field { text, quoted });
            if chars.peek().is_none() && !line.trim_end().ends_with(',') {
                return fields;
            }
            continue;
        }
        let mut more = false;
        for ch in chars.by_ref() {
            if ch == ',' {
                more = true;
                break;
            }
            text.push(ch);
        }
        fields.push(Field {
            text: text.trim_end().to_string(),
            quoted,
        });
        if !more {
            return fields;
        }
    }
}

/// A whole field as a number; blank reads as zero.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    if !s.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) {
        return None;
    }
    s.parse::<f64>().ok()
}
