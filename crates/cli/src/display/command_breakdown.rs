use ansible_run_core::{EnvValue, PosixCommand};

pub fn print_command_breakdown(command: &PosixCommand) {
    println!("🔧 Command breakdown:");
    println!("   • command: {}", command.executable());

    let (subcommands, flags, positional) = parse_posix_args(command.args());
    if !subcommands.is_empty() {
        println!("   • subcommand: {}", subcommands.join(" "));
    }
    if !flags.is_empty() {
        println!("   • options: {:?}", flags);
    }
    if !positional.is_empty() {
        println!("   • arguments: {:?}", positional);
    }

    if let Some(dir) = command.working_dir() {
        println!("   • workingDir: {}", dir.display());
    }
    if let Some(stdin) = command.stdin() {
        println!("   • stdin: {}", stdin.display());
    }

    if !command.env().is_empty() {
        println!("   • env:");
        for (key, value) in command.env().iter() {
            match value {
                EnvValue::Set(value) => println!("      - {}={}", key, value),
                EnvValue::Unset => println!("      - {} (unset)", key),
            }
        }
    }

    println!("🚀 Final command: {}", command.to_command_string());
}

/// Split arguments into leading subcommands, options, and the rest.
///
/// An option takes the following token as its value unless it is a known
/// switch or that token looks like another option.
pub fn parse_posix_args(args: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut subcommands = Vec::new();
    let mut flags = Vec::new();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() && !args[i].starts_with('-') {
        subcommands.push(args[i].clone());
        i += 1;
    }
    while i < args.len() {
        let arg = &args[i];
        if arg.starts_with('-') {
            match args.get(i + 1) {
                Some(value) if takes_value(arg) && !value.starts_with('-') => {
                    flags.push(format!("{arg} {value}"));
                    i += 1;
                }
                _ => flags.push(arg.clone()),
            }
        } else {
            positional.push(arg.clone());
        }
        i += 1;
    }

    (subcommands, flags, positional)
}

/// Whether an option is followed by a separate value.
fn takes_value(flag: &str) -> bool {
    let verbosity = flag.len() > 1 && flag[1..].chars().all(|c| c == 'v');
    !verbosity
        && !flag.contains('=')
        && !matches!(
            flag,
            "--ask-become-pass"
                | "-K"
                | "--become"
                | "-b"
                | "--check"
                | "-C"
                | "--diff"
                | "-D"
                | "--force"
                | "--force-with-deps"
                | "--no-deps"
                | "-n"
                | "--verbose"
                | "--syntax-check"
                | "--list-hosts"
                | "--list-tasks"
                | "--list-tags"
                | "--step"
                | "--flush-cache"
                | "--rm"
                | "--interactive"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_posix_args() {
        let (subcommands, flags, positional) =
            parse_posix_args(&args(&["role", "install", "--force", "-r", "reqs.yml", "-p", "roles", "x"]));
        assert_eq!(subcommands, ["role", "install"]);
        assert_eq!(flags, ["--force", "-r reqs.yml", "-p roles"]);
        assert_eq!(positional, ["x"]);
    }

    #[test]
    fn test_parse_posix_args_trailing_value() {
        let (subcommands, flags, positional) =
            parse_posix_args(&args(&["install", "-r", "requirements.yml"]));
        assert_eq!(subcommands, ["install"]);
        assert_eq!(flags, ["-r requirements.yml"]);
        assert!(positional.is_empty());
    }

    #[test]
    fn test_parse_posix_args_switch_before_argument() {
        let (_, flags, positional) =
            parse_posix_args(&args(&["--limit", "web", "-vvv", "--ask-become-pass", "site.yml"]));
        assert_eq!(flags, ["--limit web", "-vvv", "--ask-become-pass"]);
        assert_eq!(positional, ["site.yml"]);
    }

    #[test]
    fn test_parse_posix_args_without_subcommand() {
        let (subcommands, flags, positional) = parse_posix_args(&args(&["--limit", "web", "site.yml"]));
        assert!(subcommands.is_empty());
        assert_eq!(flags, ["--limit web"]);
        assert_eq!(positional, ["site.yml"]);
    }
}
