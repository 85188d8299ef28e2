use std::{
    fs::File,
    io::{self, Stderr, Stdout, stderr, stdout},
};

macro_rules! define_output_file_or_std {
    ($name:ident, $writer:ident, $std_enum:ident, $std_impl:ident, $std_mk:ident) => {
        /// Path to a file, or `-` for the standard stream
        #[derive(Debug, Clone)]
        pub enum $name {
            FilePath(String),
            $std_enum,
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    Self::$std_enum => write!(f, "-"),
                    Self::FilePath(value) => write!(f, "{value}"),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                if &value == "-" {
                    Self::$std_enum
                } else {
                    Self::FilePath(value)
                }
            }
        }

        impl $name {
            pub fn create(&self) -> io::Result<$writer> {
                match self {
                    Self::FilePath(fp) => Ok($writer::File(File::create(fp)?)),
                    Self::$std_enum => Ok($writer::$std_enum($std_mk())),
                }
            }
        }

        pub enum $writer {
            File(File),
            $std_enum($std_impl),
        }

        impl io::Write for $writer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                match self {
                    Self::File(f) => f.write(buf),
                    Self::$std_enum(fd) => {
                        let mut lock = fd.lock();
                        lock.write(buf)
                    }
                }
            }

            fn flush(&mut self) -> io::Result<()> {
                match self {
                    Self::File(f) => f.flush(),
                    Self::$std_enum(fd) => {
                        let mut lock = fd.lock();
                        lock.flush()
                    }
                }
            }
        }
    };
}

define_output_file_or_std!(
    FileOrStderr,
    FileOrStderrWriter,
    FileOrStderr,
    Stderr,
    stderr
);

define_output_file_or_std!(
    FileOrStdout,
    FileOrStdoutWriter,
    FileOrStdout,
    Stdout,
    stdout
);
