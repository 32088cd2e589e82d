//! 구조화된 스크립트 단계와 bash 렌더링
//!
//! 단계는 프로그램, 인자, 권한 상승 여부를 데이터로 가지며
//! [`Step::render`]에서 마지막에 한 줄의 bash 명령으로 바뀝니다.

use std::fmt::Write as _;

/// 명령 인자
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// 그대로 전달되는 값. 필요한 경우에만 작은따옴표로 감쌉니다.
    Literal(String),
    /// 실행 시점에 셸이 확장하는 환경변수 (`"$USER"`)
    Env(String),
}

impl Arg {
    fn render(&self, out: &mut String) {
        match self {
            Self::Literal(value) => out.push_str(&quote(value)),
            Self::Env(name) => {
                let _ = write!(out, "\"${name}\"");
            }
        }
    }
}

/// 단일 프로그램 호출
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// 실행할 프로그램
    pub program: String,
    /// 인자 목록
    pub args: Vec<Arg>,
    /// `sudo`로 실행할지 여부
    pub privileged: bool,
    /// 표준 출력을 `/dev/null`로 버릴지 여부
    pub discard_stdout: bool,
}

impl Invocation {
    /// 인자 없는 호출을 생성합니다.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            privileged: false,
            discard_stdout: false,
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Literal(value.into()));
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(values.into_iter().map(|v| Arg::Literal(v.into())));
        self
    }

    pub fn env_arg(mut self, name: impl Into<String>) -> Self {
        self.args.push(Arg::Env(name.into()));
        self
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn discard_stdout(mut self) -> Self {
        self.discard_stdout = true;
        self
    }

    fn render(&self, out: &mut String) {
        if self.privileged {
            out.push_str("sudo ");
        }
        out.push_str(&quote(&self.program));
        for arg in &self.args {
            out.push(' ');
            arg.render(out);
        }
        if self.discard_stdout {
            out.push_str(" > /dev/null");
        }
    }
}

/// 스크립트 한 줄
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// 단일 호출
    Run(Invocation),
    /// `source | sink`
    Pipe(Invocation, Invocation),
    /// `primary || fallback`. 실패 시 진단 명령을 실행하고 계속 진행합니다.
    OrElse(Invocation, Invocation),
}

impl Step {
    /// bash 명령 한 줄로 렌더링합니다.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Run(inv) => inv.render(&mut out),
            Self::Pipe(source, sink) => {
                source.render(&mut out);
                out.push_str(" | ");
                sink.render(&mut out);
            }
            Self::OrElse(primary, fallback) => {
                primary.render(&mut out);
                out.push_str(" || ");
                fallback.render(&mut out);
            }
        }
        out
    }

    /// 이 단계의 호출 목록 (렌더링 순서)
    pub fn invocations(&self) -> Vec<&Invocation> {
        match self {
            Self::Run(inv) => vec![inv],
            Self::Pipe(a, b) | Self::OrElse(a, b) => vec![a, b],
        }
    }
}

/// 셸에 안전한 문자로만 이루어진 값은 그대로, 나머지는 작은따옴표로 감쌉니다.
pub fn quote(value: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c);
    if !value.is_empty() && value.chars().all(is_safe) {
        return value.to_owned();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
