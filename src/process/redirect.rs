use tracing::debug;

use super::signal::Mode;
use super::ProcessError;

/// A non-built-in command line with its control tokens resolved.
///
/// `argv` is what the program receives: the trailing `&` and every `<`/`>`
/// pair have been removed. When the same direction is redirected twice the
/// later filename wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

impl Invocation {
    pub fn parse(tokens: &[String], mode: Mode) -> Result<Self, ProcessError> {
        let (tokens, requested) = match tokens.split_last() {
            Some((last, rest)) if last == "&" => (rest, true),
            _ => (tokens, false),
        };

        let background = requested && mode == Mode::Normal;
        if requested && !background {
            debug!("background request ignored in foreground-only mode");
        }

        let mut argv = Vec::with_capacity(tokens.len());
        let mut input = None;
        let mut output = None;
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            match token.as_str() {
                "<" => {
                    let file = iter.next().ok_or_else(|| {
                        ProcessError::Syntax("expected a filename after '<'".to_string())
                    })?;
                    input = Some(file.clone());
                }
                ">" => {
                    let file = iter.next().ok_or_else(|| {
                        ProcessError::Syntax("expected a filename after '>'".to_string())
                    })?;
                    output = Some(file.clone());
                }
                _ => argv.push(token.clone()),
            }
        }

        if argv.is_empty() {
            return Err(ProcessError::Syntax("missing command".to_string()));
        }

        Ok(Invocation {
            argv,
            input,
            output,
            background,
        })
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_plain_command() {
        let inv = Invocation::parse(&tokens("ls -la /tmp"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, tokens("ls -la /tmp"));
        assert_eq!(inv.input, None);
        assert_eq!(inv.output, None);
        assert!(!inv.background);
        assert_eq!(inv.program(), "ls");
    }

    #[test]
    fn test_redirections_are_removed_from_argv() {
        let inv =
            Invocation::parse(&tokens("sort < unsorted.txt > sorted.txt"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, vec!["sort".to_string()]);
        assert_eq!(inv.input.as_deref(), Some("unsorted.txt"));
        assert_eq!(inv.output.as_deref(), Some("sorted.txt"));
    }

    #[test]
    fn test_redirection_anywhere_in_line() {
        let inv = Invocation::parse(&tokens("wc > out.txt -l < in.txt"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, tokens("wc -l"));
        assert_eq!(inv.input.as_deref(), Some("in.txt"));
        assert_eq!(inv.output.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_last_redirection_wins() {
        let inv = Invocation::parse(&tokens("cat < a < b > c > d"), Mode::Normal).unwrap();
        assert_eq!(inv.input.as_deref(), Some("b"));
        assert_eq!(inv.output.as_deref(), Some("d"));
    }

    #[test]
    fn test_background_in_normal_mode() {
        let inv = Invocation::parse(&tokens("sleep 5 &"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, tokens("sleep 5"));
        assert!(inv.background);
    }

    #[test]
    fn test_background_ignored_in_foreground_only_mode() {
        let inv = Invocation::parse(&tokens("sleep 5 &"), Mode::ForegroundOnly).unwrap();
        assert_eq!(inv.argv, tokens("sleep 5"));
        assert!(!inv.background);
    }

    #[test]
    fn test_ampersand_only_special_at_end() {
        let inv = Invocation::parse(&tokens("echo & done"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, tokens("echo & done"));
        assert!(!inv.background);
    }

    #[test]
    fn test_background_with_redirection() {
        let inv = Invocation::parse(&tokens("sort < in > out &"), Mode::Normal).unwrap();
        assert_eq!(inv.argv, tokens("sort"));
        assert!(inv.background);
    }

    #[test]
    fn test_missing_filename() {
        assert!(matches!(
            Invocation::parse(&tokens("cat <"), Mode::Normal),
            Err(ProcessError::Syntax(_))
        ));
        assert!(matches!(
            Invocation::parse(&tokens("ls > &"), Mode::Normal),
            Err(ProcessError::Syntax(_))
        ));
    }

    #[test]
    fn test_missing_command() {
        assert!(matches!(
            Invocation::parse(&tokens("&"), Mode::Normal),
            Err(ProcessError::Syntax(_))
        ));
        assert!(matches!(
            Invocation::parse(&tokens("< in.txt"), Mode::Normal),
            Err(ProcessError::Syntax(_))
        ));
    }
}
