/// One entry of the command surface. The table drives the `/help` reply so
/// the reference text cannot drift from the parser.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "chat",
        usage: "/chat <text>",
        description: "Talk to the hosted chat model",
    },
    CommandSpec {
        name: "system",
        usage: "/system <text>",
        description: "Send a system-level instruction to the hosted chat model",
    },
    CommandSpec {
        name: "completion",
        usage: "/completion <text>",
        description: "One-shot text completion, kept out of the history",
    },
    CommandSpec {
        name: "models",
        usage: "/models",
        description: "List the remote models available",
    },
    CommandSpec {
        name: "set-model",
        usage: "/set-model <chat|completions> <model>",
        description: "Pick the model for one mode",
    },
    CommandSpec {
        name: "clear",
        usage: "/clear <OPENAI|WEBUI>",
        description: "Erase this chat's history for one backend",
    },
    CommandSpec {
        name: "clearAll",
        usage: "/clearAll <OPENAI|WEBUI>",
        description: "Erase every chat's history for one backend",
    },
    CommandSpec {
        name: "web",
        usage: "/web <text>",
        description: "Talk to the local backend as the selected character",
    },
    CommandSpec {
        name: "list-characters",
        usage: "/list-characters",
        description: "List the characters in the catalog",
    },
    CommandSpec {
        name: "select-character",
        usage: "/select-character <name>",
        description: "Switch the active character (clears this chat's local history)",
    },
    CommandSpec {
        name: "help",
        usage: "/help",
        description: "Show this command reference",
    },
];

/// The static `/help` reply.
pub fn help_text() -> String {
    let mut help = String::from("Commands:\n");
    for command in COMMANDS {
        help.push_str("  ");
        help.push_str(command.usage);
        help.push_str(" - ");
        help.push_str(command.description);
        help.push('\n');
    }
    help.truncate(help.trim_end().len());
    help
}
