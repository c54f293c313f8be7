//! Contract interfaces for the note and wave portals.

use alloy::sol;

sol! {
    contract NotePortal {
        struct Note {
            address player;
            string note;
            uint256 timestamp;
        }

        function getAllNotes() external view returns (Note[] memory);
        function getTotalNotes() external view returns (uint256);
        function playNote(string memory _note) external;
    }
}

sol! {
    contract WavePortal {
        struct Wave {
            address waver;
            string message;
            uint256 timestamp;
        }

        function getAllWaves() external view returns (Wave[] memory);
        function getTotalWaves() external view returns (uint256);
        function wave(string memory _message) external;
    }
}
