//! Shell integration scripts printed by `gotry init <shell>`.
//!
//! Each script defines a `gt` function that runs gotry and `cd`s into the printed path when it
//! is a directory. Anything else that was printed is echoed back.

/// Shells with an integration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// bash and zsh share one script.
    Posix,
    Fish,
    PowerShell,
}

impl Shell {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bash" | "zsh" | "sh" => Some(Shell::Posix),
            "fish" => Some(Shell::Fish),
            "powershell" | "pwsh" => Some(Shell::PowerShell),
            _ => None,
        }
    }

    pub fn script(self) -> &'static str {
        match self {
            Shell::Posix => POSIX_INIT,
            Shell::Fish => FISH_INIT,
            Shell::PowerShell => POWERSHELL_INIT,
        }
    }
}

const POSIX_INIT: &str = r#"# gotry shell integration
# Add this to your .bashrc or .zshrc:
#   eval "$(gotry init bash)"  # or zsh

gt() {
    local result
    result=$(gotry "$@")
    local exit_code=$?

    if [ $exit_code -eq 0 ] && [ -n "$result" ] && [ -d "$result" ]; then
        cd "$result"
    elif [ -n "$result" ]; then
        echo "$result"
    fi

    return $exit_code
}
"#;

const FISH_INIT: &str = r#"# gotry shell integration
# Add this to your config.fish:
#   gotry init fish | source

function gt
    set -l result (gotry $argv)
    set -l exit_code $status

    if test $exit_code -eq 0; and test -n "$result"; and test -d "$result"
        cd "$result"
    else if test -n "$result"
        echo "$result"
    end

    return $exit_code
end
"#;

const POWERSHELL_INIT: &str = r#"# gotry shell integration
# Add this to your PowerShell profile ($PROFILE):
#   gotry init powershell | Invoke-Expression

function gt {
    $result = gotry @args
    $exitCode = $LASTEXITCODE

    if ($exitCode -eq 0 -and $result -and (Test-Path -Path $result -PathType Container)) {
        Set-Location $result
    } elseif ($result) {
        Write-Output $result
    }

    return $exitCode
}
"#;
