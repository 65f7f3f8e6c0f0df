// Numbench - Numerical micro-benchmark harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Writes the completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut io::stdout());
}

/// Installation instructions for the completion script of `shell`.
///
/// # Examples
///
/// ```
/// use clap_complete::Shell;
/// use numbench_cli::commands::installation_instructions;
///
/// assert!(installation_instructions(Shell::Zsh).contains("~/.zshrc"));
/// ```
pub fn installation_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r#"# Bash completion installation:

# For current session only:
eval "$(numbench completion bash)"

# Or save to completions directory:
numbench completion bash > ~/.local/share/bash-completion/completions/numbench
"#
        .to_string(),
        Shell::Zsh => r#"# Zsh completion installation:

# For persistent installation, add to your ~/.zshrc:
echo 'eval "$(numbench completion zsh)"' >> ~/.zshrc
"#
        .to_string(),
        Shell::Fish => r#"# Fish completion installation:

numbench completion fish > ~/.config/fish/completions/numbench.fish
"#
        .to_string(),
        Shell::PowerShell => r#"# PowerShell completion installation:

# Add this line to the profile at $PROFILE:
numbench completion powershell | Out-String | Invoke-Expression
"#
        .to_string(),
        Shell::Elvish => r#"# Elvish completion installation:

# Add this line to ~/.elvish/rc.elv:
eval (numbench completion elvish)
"#
        .to_string(),
        other => format!("# No installation instructions for {}\n", other),
    }
}
